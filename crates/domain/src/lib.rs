//! Domain layer of the wellness dashboard: record shapes, the generic
//! list engine every checklist page instantiates, date-keyed logs and
//! the indicator interpretation rules. No terminal or network code
//! lives here.

pub mod daily;
pub mod ids;
pub mod indicators;
pub mod keys;
pub mod list;
pub mod records;

pub use daily::{DailyLog, DailyRecord};
pub use ids::next_id;
pub use indicators::{interpret, marker_percent, spec_by_id, IndicatorSpec, Interpretation, Zone, ZoneColor, CATALOG};
pub use list::{
    by_due_date, category_distribution, group_by_category, paginate, FilterSpec, InsertPosition,
    ListController,
    PageSlice, Record, SortFn, StatusFilter, UNCATEGORIZED,
};
pub use records::{
    default_categories, BiomarkerSample, DailyPlan, DailyTask, Exercise, Goal, IndicatorReading,
    Priority, SleepLog, Task,
};
