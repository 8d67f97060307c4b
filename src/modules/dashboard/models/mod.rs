mod dashboard_stats;

pub use dashboard_stats::{DashboardStats, DashboardStatsResponse};
