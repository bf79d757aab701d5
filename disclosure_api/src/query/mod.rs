mod common;
pub use self::common::{Query, QueryCommon};

mod disclosure;
pub use self::disclosure::DisclosureQuery;
