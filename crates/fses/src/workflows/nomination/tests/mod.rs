mod common;
mod eligibility;
mod reporting;
