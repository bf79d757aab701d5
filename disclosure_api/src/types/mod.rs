mod page;
pub use self::page::DisclosurePage;

mod exchange;
pub use self::exchange::{Exchange, ExchangeFilter};

mod disclosure;
pub use self::disclosure::Disclosure;

mod raw;
pub use self::raw::{CategoryId, RawAnalysisDetails, RawDetails, RawRecord};
