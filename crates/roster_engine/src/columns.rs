//! Column names shared by the pipeline and the export.

pub const PROFILE_URL: &str = "profile_url";
pub const MESSAGE: &str = "message";
pub const SENT_TIME: &str = "sent time";
pub const FULL_NAME: &str = "fullName";
pub const HEADLINE: &str = "headline";
pub const SUMMARY: &str = "summary";
pub const TOTAL_EXPERIENCE: &str = "Total Years of Exp(in Yrs)";
pub const CURRENT_FIRM_EXPERIENCE: &str = "Exp in Current Firm(In Yrs.Months)";

/// Placeholder written for any selected column a row has no value for.
pub const MISSING_CELL: &str = "N/A";
