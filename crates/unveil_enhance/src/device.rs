//! Device and viewport classification
//!
//! Classifies the host by viewport size and orientation and mirrors the
//! result as `mod-*` class tokens on a designated root element, the way the
//! stylesheet contract expects. The explicit [`DeviceQuery`] surface replaces
//! ad-hoc global lookups: it always answers, with defined defaults when no
//! classification has happened yet.
//!
//! Resize signals are debounced through a 100 ms quiet period so bursts of
//! window resizing collapse into one reclassification.

use std::time::{Duration, Instant};
use tracing::debug;
use unveil_core::{Debouncer, Document, ElementId, EnvCapabilities};

/// Widths at or below this are mobile.
pub const MOBILE_MAX_WIDTH: f32 = 479.0;
/// Widths at or below this (and above mobile) are tablet.
pub const TABLET_MAX_WIDTH: f32 = 991.0;

/// Quiet period for resize reclassification.
pub const RESIZE_QUIET_PERIOD: Duration = Duration::from_millis(100);

/// Class tokens applied to the root element.
pub mod classes {
    pub const JS: &str = "mod-js";
    pub const TOUCH: &str = "mod-touch";
    pub const MOBILE: &str = "mod-mobile";
    pub const TABLET: &str = "mod-tablet";
    pub const DESKTOP: &str = "mod-desktop";
    pub const PORTRAIT: &str = "mod-portrait";
    pub const LANDSCAPE: &str = "mod-landscape";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceType {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceType {
    pub fn from_width(width: f32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Mobile => classes::MOBILE,
            Self::Tablet => classes::TABLET,
            Self::Desktop => classes::DESKTOP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

impl Orientation {
    pub fn from_size(width: f32, height: f32) -> Self {
        if height > width {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Portrait => classes::PORTRAIT,
            Self::Landscape => classes::LANDSCAPE,
        }
    }
}

/// The read-only query surface. Defaults apply until a classification runs:
/// not touch, desktop, landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceQuery {
    pub is_touch: bool,
    pub device_type: DeviceType,
    pub orientation: Orientation,
}

/// Applies device classification to a root element and answers queries.
pub struct DeviceClassifier {
    root: ElementId,
    query: DeviceQuery,
    pending_resize: Debouncer<(f32, f32)>,
}

impl DeviceClassifier {
    /// Returns `None` when the root element is missing; the feature then
    /// independently no-ops without affecting anything else.
    pub fn new(doc: &mut Document, root: ElementId, caps: EnvCapabilities) -> Option<Self> {
        let element = doc.get_mut(root)?;
        element.classes_mut().add(classes::JS);
        element.classes_mut().set(classes::TOUCH, caps.touch);
        Some(Self {
            root,
            query: DeviceQuery {
                is_touch: caps.touch,
                ..Default::default()
            },
            pending_resize: Debouncer::new(RESIZE_QUIET_PERIOD),
        })
    }

    /// Classify immediately for the given viewport size, replacing any stale
    /// device and orientation tokens on the root.
    pub fn classify(&mut self, doc: &mut Document, width: f32, height: f32) {
        let device_type = DeviceType::from_width(width);
        let orientation = Orientation::from_size(width, height);

        if let Some(element) = doc.get_mut(self.root) {
            let list = element.classes_mut();
            list.remove(classes::MOBILE);
            list.remove(classes::TABLET);
            list.remove(classes::DESKTOP);
            list.add(device_type.class());

            list.remove(classes::PORTRAIT);
            list.remove(classes::LANDSCAPE);
            list.add(orientation.class());
        }

        self.query.device_type = device_type;
        self.query.orientation = orientation;
        debug!(?device_type, ?orientation, "device classified");
    }

    /// Record a resize signal; reclassification runs after the quiet period.
    pub fn notify_resized(&mut self, now: Instant, width: f32, height: f32) {
        self.pending_resize.schedule(now, (width, height));
    }

    /// Run a pending debounced reclassification if its deadline has passed.
    pub fn poll(&mut self, now: Instant, doc: &mut Document) {
        if let Some((width, height)) = self.pending_resize.poll(now) {
            self.classify(doc, width, height);
        }
    }

    pub fn query(&self) -> DeviceQuery {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::{Element, Rect};

    fn root_doc() -> (Document, ElementId) {
        let mut doc = Document::new();
        let root = doc.insert(Element::new(Rect::new(0.0, 0.0)));
        (doc, root)
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(DeviceType::from_width(479.0), DeviceType::Mobile);
        assert_eq!(DeviceType::from_width(480.0), DeviceType::Tablet);
        assert_eq!(DeviceType::from_width(991.0), DeviceType::Tablet);
        assert_eq!(DeviceType::from_width(992.0), DeviceType::Desktop);
    }

    #[test]
    fn test_construction_applies_base_classes() {
        let (mut doc, root) = root_doc();
        let caps = EnvCapabilities::default().with_touch(true);
        let classifier = DeviceClassifier::new(&mut doc, root, caps).unwrap();

        let classes = doc.get(root).unwrap().classes();
        assert!(classes.contains(classes::JS));
        assert!(classes.contains(classes::TOUCH));
        assert!(classifier.query().is_touch);
    }

    #[test]
    fn test_missing_root_noops() {
        let (mut doc, root) = root_doc();
        doc.remove(root);
        assert!(DeviceClassifier::new(&mut doc, root, EnvCapabilities::default()).is_none());
    }

    #[test]
    fn test_classify_replaces_stale_tokens() {
        let (mut doc, root) = root_doc();
        let mut classifier =
            DeviceClassifier::new(&mut doc, root, EnvCapabilities::default()).unwrap();

        classifier.classify(&mut doc, 375.0, 812.0);
        {
            let classes = doc.get(root).unwrap().classes();
            assert!(classes.contains(classes::MOBILE));
            assert!(classes.contains(classes::PORTRAIT));
        }
        assert_eq!(classifier.query().device_type, DeviceType::Mobile);

        classifier.classify(&mut doc, 1440.0, 900.0);
        let classes = doc.get(root).unwrap().classes();
        assert!(classes.contains(classes::DESKTOP));
        assert!(classes.contains(classes::LANDSCAPE));
        assert!(!classes.contains(classes::MOBILE));
        assert!(!classes.contains(classes::PORTRAIT));
    }

    #[test]
    fn test_defaults_before_classification() {
        let (mut doc, root) = root_doc();
        let classifier =
            DeviceClassifier::new(&mut doc, root, EnvCapabilities::default()).unwrap();
        let query = classifier.query();
        assert!(!query.is_touch);
        assert_eq!(query.device_type, DeviceType::Desktop);
        assert_eq!(query.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_resize_is_debounced() {
        let (mut doc, root) = root_doc();
        let mut classifier =
            DeviceClassifier::new(&mut doc, root, EnvCapabilities::default()).unwrap();
        let t0 = Instant::now();

        classifier.notify_resized(t0, 375.0, 812.0);
        classifier.notify_resized(t0 + Duration::from_millis(50), 1440.0, 900.0);

        // First deadline passed but was replaced by the second signal
        classifier.poll(t0 + Duration::from_millis(120), &mut doc);
        assert_eq!(classifier.query().device_type, DeviceType::Desktop);
        assert!(!doc.get(root).unwrap().classes().contains(classes::MOBILE));

        classifier.poll(t0 + Duration::from_millis(150), &mut doc);
        assert!(doc.get(root).unwrap().classes().contains(classes::DESKTOP));
    }
}
