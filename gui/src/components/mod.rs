// GUI components module
pub mod alert_overlay;
pub mod loading;
pub mod product_lookup;
pub mod tooltip;

pub use alert_overlay::AlertOverlay;
pub use loading::LoadingSpinner;
pub use product_lookup::ProductLookup;
pub use tooltip::Tooltip;
