/// UI widgets for the query page
///
/// - Loading spinner drawn on a canvas (spinner.rs)
/// - Toast notification overlay (toast.rs)
/// - Answer, image gallery and source list (results.rs)

pub mod results;
pub mod spinner;
pub mod toast;
