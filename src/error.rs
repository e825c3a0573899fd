/// Failures of the grade calculations. Each one is shown to the user as a
/// prompt rather than ending the program.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error("no course has both a valid credit and a valid score")]
    EmptyInput,

    #[error("no current credits to project from")]
    NoBaseline,

    #[error("target GPA must be a finite number, got {0}")]
    InvalidTarget(f64),
}

pub type GradeResult<T> = Result<T, GradeError>;
