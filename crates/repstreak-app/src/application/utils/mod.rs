mod dates;
mod ids;

pub use dates::{format_date, parse_date_arg};
pub use ids::parse_user_id;
