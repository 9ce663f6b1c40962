//! Text-to-graph engine for the weekly task log.
//!
//! A [`RawTable`] is turned into a dense [`Timeline`] of [`WeekEntry`]s once
//! per load. Everything after that is a pure function of the timeline, a
//! cumulative week index and a staff filter:
//!
//! ```
//! use neural_sync::engine::{EngineConfig, Timeline};
//!
//! let csv = "Date,Ops\n2025-01-06,- Fixed pump (Anh/Cong)\n";
//! let timeline = Timeline::from_csv(csv, &EngineConfig::default()).unwrap();
//!
//! let snapshot = timeline.snapshot(0, timeline.staff());
//! assert_eq!(snapshot.nodes.len(), 2);
//! assert_eq!(snapshot.links.len(), 1);
//! assert_eq!(timeline.tasks_for("Anh", 0), vec!["- Fixed pump (Anh/Cong)"]);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod snapshot;
pub mod table;
pub mod tasks;
pub mod timeline;

/// Case-sensitive staff identifier, exactly as written in the attribution.
pub type StaffId = String;

pub use aggregate::{Activity, Connection};
pub use config::{EngineConfig, ExtractorConfig, SnapshotConfig, TimelineConfig};
pub use error::LoadError;
pub use extract::NameExtractor;
pub use snapshot::{GraphSnapshot, StaffLink, StaffNode};
pub use table::{RawRow, RawTable};
pub use timeline::{Timeline, WeekEntry};
