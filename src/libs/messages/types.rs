/// Every piece of user-facing text the application prints.
///
/// Variants carry the dynamic parts of a message; the wording itself lives in
/// the `Display` implementation in [`super::display`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),        // title
    TaskUpdated(String),        // title
    TaskDeleted(String),        // id
    TaskCompleted(String),      // title
    TaskReopened(String),       // title
    TaskNotFound(String),       // id
    TasksHeader(String),        // filter
    NoTasksFound,
    StartByAddingTask,
    NoFilteredTasks(String),    // filter
    LoadingTasks,
    TaskCountSummary { shown: usize, total: usize },

    // === TASK FAILURES ===
    FetchTasksFailed,
    AddTaskFailed,
    UpdateTaskFailed,
    DeleteTaskFailed,
    EditTaskFailed,

    // === DUE STATUS ===
    Overdue,
    DueToday,
    DueTomorrow,
    DaysLeft(i64),

    // === AUTHENTICATION MESSAGES ===
    NotSignedIn,
    SignedInAs(String),    // email
    SignedOut,
    AccountCreated(String),  // email
    ConfirmEmailSent(String), // email
    AuthFailed,
    SessionRestoreFailed(String), // error
    SignOutIncomplete(String),    // error

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleSupabase,
    SupabaseNotConfigured,

    // === PROMPTS ===
    PromptSupabaseUrl,
    PromptSupabaseAnonKey,
    PromptPassword,
    PromptCreatePassword(usize), // minimum length
    PromptConfirmPassword,
    PasswordMismatch,
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDueDate,
    ConfirmDeleteTask(String), // title
    OperationCancelled,
}
