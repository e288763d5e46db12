//! Shared constants for the Pipeguard compliance engine.

/// Pipeguard version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default time-to-live of a cached task-group step list, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Default maximum number of cached task-group step lists.
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

/// Default number of fetch threads per search layer (0 = auto-detect).
pub const DEFAULT_FETCH_THREADS: usize = 0;

/// Default minimum number of days a pipeline run must be retained.
pub const DEFAULT_MIN_RETENTION_DAYS: i64 = 450;

/// Default minimum number of approvers on a production stage.
pub const DEFAULT_MIN_APPROVERS: i64 = 1;

/// Task identifiers that mark a pipeline as a mainframe (COBOL) toolchain.
pub const DEFAULT_MAINFRAME_TASK_IDS: &[&str] = &[
    "e1b5a3c2-7c4f-4b1e-9d53-2f1e6a0c9b10", // DBB build
    "3f9d2a61-0b8e-4a4c-8a9e-6c5d7b2e4f31", // IBM zDeploy
];

/// Credential scanner task.
pub const TASK_CRED_SCAN: &str = "f0462eae-4df1-45e9-a754-8184da95ed01";

/// Post-analysis task that breaks the build on credential-scan findings.
pub const TASK_POST_ANALYSIS: &str = "4f2a1d3e-ec6a-4fc1-8b2c-4c3b2e8a1f77";

/// SonarQube "prepare analysis" task.
pub const TASK_SONARQUBE_PREPARE: &str = "15b84ca1-b62f-4a2a-a403-89b77a063157";

/// SonarQube "run analysis" task.
pub const TASK_SONARQUBE_ANALYZE: &str = "6d01813a-9589-4b15-8491-8164aeb38055";

/// Fortify static code analyzer task.
pub const TASK_FORTIFY_SCA: &str = "818386e5-c8a5-46c3-822d-954b3c8fb130";

/// "Publish build artifacts" task.
pub const TASK_PUBLISH_BUILD_ARTIFACTS: &str = "2ff763a7-ce83-4e1f-bc89-0ae63477cebe";

/// "Publish pipeline artifact" task.
pub const TASK_PUBLISH_PIPELINE_ARTIFACT: &str = "ecdc45f6-832d-4ad9-b52b-ee49e94659be";

/// "Download pipeline artifact" task; inputs `project` and `pipeline`.
pub const TASK_DOWNLOAD_PIPELINE_ARTIFACT: &str = "61f2a582-95ae-4948-b34d-a1b3c4f6a737";

/// "Download build artifacts" task; inputs `project` and `definition`.
pub const TASK_DOWNLOAD_BUILD_ARTIFACTS: &str = "a433f589-fce1-4460-9ee6-44a624aeb1fb";

/// Setting key holding the number of days runs are retained.
pub const SETTING_RETENTION_DAYS: &str = "retention.days_to_keep";

/// Setting key: whether the production stage requires approvals at all.
pub const SETTING_APPROVALS_REQUIRED: &str = "approvals.required";

/// Setting key: minimum number of approvers on the production stage.
pub const SETTING_MIN_APPROVERS: &str = "approvals.minimum_approvers";

/// Setting key: whether the run's creator may approve it.
pub const SETTING_CREATOR_CAN_APPROVE: &str = "approvals.creator_can_approve";
