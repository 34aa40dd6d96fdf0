//! Store and view contract for switch-case views.
//!
//! A tagged union annotated with [`with_switch_case_view`] gets a `<Enum>View`
//! type that reads the union out of a [`Store`], matches on the active
//! variant and hands a narrowed store to the variant's own view:
//!
//! ```ignore
//! #[with_switch_case_view]
//! enum Sheet {
//!     Info(Info),
//!     Settings(Settings),
//! }
//!
//! let sheet = Sheet::Info(Info { number: 7 });
//! let element = SheetView::from_store(Store::new(&sheet)).body();
//! ```
//!
//! Payload views (`InfoView`, `SettingsView`) are written by hand against
//! [`FromStore`] and [`View`].

mod element;
mod store;
mod view;

pub use caseview_macros::with_switch_case_view;
pub use element::Element;
pub use store::Store;
pub use view::{FromStore, HasView, View};
