//! Human-readable rendering of spell text and durations.

mod description;
mod duration;
mod expression;

pub use description::{DescribeError, DescriptionFormatter};
pub use duration::{DurationStyle, describe_duration};
pub use expression::{ExpressionError, evaluate};
