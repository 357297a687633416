mod summary;

pub use summary::{build_snapshot, render_text, write_summary, EpicSnapshot, RoleSnapshot, StatusSnapshot};
