//! Unveil Page Enhancements
//!
//! The interaction plumbing around the reveal core, each feature a headless
//! controller over the document model:
//!
//! - **Device Classifier**: viewport breakpoints and orientation mirrored as
//!   `mod-*` tokens, with an explicit query surface
//! - **Dropdown / Side Menu**: FSM-driven open/close with class and
//!   `aria-expanded` bookkeeping
//! - **Header Scroll State**: `navbar-scrolled` past a fixed offset
//! - **Fragment Loader**: template splice with an offline stand-in
//!
//! Every controller with a required DOM anchor returns `None` from its
//! constructor when the anchor is missing and no-ops from then on; one
//! absent anchor never blocks unrelated features.

pub mod device;
pub mod dropdown;
pub mod error;
pub mod fragment;
pub mod header;
pub mod menu;

pub use device::{DeviceClassifier, DeviceQuery, DeviceType, Orientation};
pub use dropdown::Dropdown;
pub use error::{EnhanceError, Result};
pub use fragment::{extract_fragment, fallback_fragment, FragmentLoader};
pub use header::HeaderScrollState;
pub use menu::SideMenu;
