//! Database entities.
//!
//! `vendor_totals`, `departments` and `programs` are published by the data
//! pipeline and only read here. `whistleblower_tips` and `subscribers` are
//! written by the visitor forms.

pub mod department;
pub mod program;
pub mod subscriber;
pub mod vendor_total;
pub mod whistleblower_tip;

pub use department::Entity as Department;
pub use program::Entity as Program;
pub use subscriber::Entity as Subscriber;
pub use vendor_total::Entity as VendorTotal;
pub use whistleblower_tip::Entity as WhistleblowerTip;
