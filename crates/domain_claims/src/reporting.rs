//! HR payment and summary reports
//!
//! Aggregation only. Rendering to PDF, spreadsheets or screens is left to
//! whoever consumes a [`ReportResult`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, DateRange, Money, Timezone};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;

/// One approved claim on a payment report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLine {
    pub claim_id: ClaimId,
    pub lecturer_name: String,
    pub contract_name: String,
    pub hours_worked: u32,
    pub hourly_rate: Money,
    pub total_amount: Money,
    pub submitted_at: DateTime<Utc>,
    /// Last transition time, or submission time for claims never touched
    pub approved_at: DateTime<Utc>,
}

/// Claims of one status on a summary report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub status: ClaimStatus,
    pub count: usize,
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_claims: usize,
    pub total_amount: Money,
    pub total_hours: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub lines: Vec<PaymentLine>,
    pub rows: Vec<SummaryRow>,
    pub summary: ReportSummary,
}

/// Builds HR reports over a snapshot of claims
#[derive(Debug, Clone, Copy)]
pub struct ClaimReporter {
    currency: Currency,
    timezone: Timezone,
}

impl ClaimReporter {
    pub fn new(currency: Currency, timezone: Timezone) -> Self {
        Self { currency, timezone }
    }

    /// Approved claims submitted on a local date inside `range`
    pub fn payment_report(
        &self,
        claims: &[Claim],
        range: DateRange,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportResult, ClaimError> {
        let approved: Vec<&Claim> = self.approved_in(claims, range).collect();

        let lines = approved
            .iter()
            .map(|c| PaymentLine {
                claim_id: c.id,
                lecturer_name: c.lecturer_name.clone(),
                contract_name: c.contract_name.clone(),
                hours_worked: c.hours_worked,
                hourly_rate: c.hourly_rate,
                total_amount: c.total_amount(),
                submitted_at: c.submitted_at,
                approved_at: c.last_updated_at.unwrap_or(c.submitted_at),
            })
            .collect();

        Ok(ReportResult {
            title: format!("Payment Report - {} to {}", range.start, range.end),
            generated_at,
            lines,
            rows: Vec::new(),
            summary: self.summarize(&approved)?,
        })
    }

    /// Claims grouped by status, optionally restricted to one status
    ///
    /// Groups appear in the order their status is first seen.
    pub fn claims_summary_report(
        &self,
        claims: &[Claim],
        status_filter: Option<ClaimStatus>,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportResult, ClaimError> {
        let filtered: Vec<&Claim> = claims
            .iter()
            .filter(|c| status_filter.map_or(true, |s| c.status() == s))
            .collect();

        let mut rows: Vec<SummaryRow> = Vec::new();
        for claim in &filtered {
            let total = claim.total_amount();
            match rows.iter_mut().find(|r| r.status == claim.status()) {
                Some(row) => {
                    row.count += 1;
                    row.total_amount = row.total_amount.checked_add(&total)?;
                }
                None => rows.push(SummaryRow {
                    status: claim.status(),
                    count: 1,
                    total_amount: total,
                }),
            }
        }

        let label = status_filter.map_or("All Statuses", |s| s.as_str());
        Ok(ReportResult {
            title: format!("Claims Summary Report - {}", label),
            generated_at,
            lines: Vec::new(),
            rows,
            summary: self.summarize(&filtered)?,
        })
    }

    pub fn total_payments_for_period(
        &self,
        claims: &[Claim],
        range: DateRange,
    ) -> Result<Money, ClaimError> {
        let totals: Vec<Money> = self.approved_in(claims, range).map(Claim::total_amount).collect();
        Ok(Money::sum(&totals, self.currency)?)
    }

    pub fn approved_for_payment(claims: &[Claim]) -> Vec<Claim> {
        claims
            .iter()
            .filter(|c| c.status() == ClaimStatus::Approved)
            .cloned()
            .collect()
    }

    fn approved_in<'a>(
        &'a self,
        claims: &'a [Claim],
        range: DateRange,
    ) -> impl Iterator<Item = &'a Claim> + 'a {
        claims.iter().filter(move |c| {
            c.status() == ClaimStatus::Approved
                && range.contains_instant(c.submitted_at, &self.timezone)
        })
    }

    fn summarize(&self, claims: &[&Claim]) -> Result<ReportSummary, ClaimError> {
        let totals: Vec<Money> = claims.iter().map(|c| c.total_amount()).collect();
        Ok(ReportSummary {
            total_claims: claims.len(),
            total_amount: Money::sum(&totals, self.currency)?,
            total_hours: claims.iter().map(|c| u64::from(c.hours_worked)).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{WorkflowAction, WorkflowDecision};
    use chrono::{NaiveDate, TimeZone};
    use core_kernel::MoneyError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn claim_at(hours: u32, rate: Decimal, action: WorkflowAction, at: DateTime<Utc>) -> Claim {
        let mut claim = Claim::new(
            ClaimId::new_v7(),
            "Jane Lecturer",
            "PROG6212",
            hours,
            Money::new(rate, Currency::ZAR),
            at,
        );
        claim
            .apply_decision(&WorkflowDecision {
                action,
                message: String::new(),
                reasons: vec![],
                warnings: vec![],
                recommendations: vec![],
            })
            .unwrap();
        claim
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reporter() -> ClaimReporter {
        ClaimReporter::new(Currency::ZAR, Timezone::default())
    }

    #[test]
    fn test_payment_report_includes_whole_end_date() {
        // 21:00 UTC on 31 May is 23:00 local, still inside May
        let late = Utc.with_ymd_and_hms(2024, 5, 31, 21, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap();
        let claims = vec![
            claim_at(10, dec!(100), WorkflowAction::AutoApprove, late),
            claim_at(20, dec!(150), WorkflowAction::AutoApprove, early),
            claim_at(40, dec!(100), WorkflowAction::RouteToManager, early),
        ];

        let range = DateRange::new(date(2024, 5, 1), date(2024, 5, 31)).unwrap();
        let report = reporter().payment_report(&claims, range, late).unwrap();

        assert_eq!(report.title, "Payment Report - 2024-05-01 to 2024-05-31");
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.summary.total_claims, 2);
        assert_eq!(report.summary.total_amount.amount(), dec!(4000));
        assert_eq!(report.summary.total_hours, 30);
        assert_eq!(report.lines[0].approved_at, late);
    }

    #[test]
    fn test_payment_report_uses_local_date() {
        // 22:30 UTC on 31 May is already 1 June in Johannesburg
        let at = Utc.with_ymd_and_hms(2024, 5, 31, 22, 30, 0).unwrap();
        let claims = vec![claim_at(10, dec!(100), WorkflowAction::AutoApprove, at)];

        let may = DateRange::new(date(2024, 5, 1), date(2024, 5, 31)).unwrap();
        assert!(reporter().payment_report(&claims, may, at).unwrap().lines.is_empty());

        let june = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        let june_total = reporter().total_payments_for_period(&claims, june).unwrap();
        assert_eq!(june_total.amount(), dec!(1000));
    }

    #[test]
    fn test_summary_groups_in_first_seen_order() {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let claims = vec![
            claim_at(40, dec!(100), WorkflowAction::RouteToManager, at),
            claim_at(10, dec!(100), WorkflowAction::AutoApprove, at),
            claim_at(10, dec!(600), WorkflowAction::Reject, at),
            claim_at(10, dec!(50), WorkflowAction::RouteToManager, at),
        ];

        let report = reporter().claims_summary_report(&claims, None, at).unwrap();
        assert_eq!(report.title, "Claims Summary Report - All Statuses");

        let statuses: Vec<_> = report.rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![ClaimStatus::Pending, ClaimStatus::Approved, ClaimStatus::Rejected]
        );
        assert_eq!(report.rows[0].count, 2);
        assert_eq!(report.rows[0].total_amount.amount(), dec!(4500));
        assert_eq!(report.summary.total_claims, 4);
        assert_eq!(report.summary.total_amount.amount(), dec!(11500));
    }

    #[test]
    fn test_summary_with_status_filter() {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let claims = vec![
            claim_at(40, dec!(100), WorkflowAction::RouteToManager, at),
            claim_at(10, dec!(100), WorkflowAction::AutoApprove, at),
        ];

        let report = reporter()
            .claims_summary_report(&claims, Some(ClaimStatus::Approved), at)
            .unwrap();
        assert_eq!(report.title, "Claims Summary Report - Approved");
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.summary.total_claims, 1);
    }

    #[test]
    fn test_overflowing_totals_are_errors() {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let huge = Decimal::MAX / dec!(2);
        let claims = vec![
            claim_at(3, huge, WorkflowAction::AutoApprove, at),
            claim_at(3, huge, WorkflowAction::AutoApprove, at),
        ];

        let result = reporter().claims_summary_report(&claims, None, at);
        assert!(matches!(result, Err(ClaimError::Money(MoneyError::Overflow(_)))));

        let may = DateRange::new(date(2024, 5, 1), date(2024, 5, 31)).unwrap();
        assert!(reporter().payment_report(&claims, may, at).is_err());
    }

    #[test]
    fn test_empty_period_totals_zero() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let total = reporter().total_payments_for_period(&[], range).unwrap();
        assert!(total.is_zero());
        assert_eq!(total.currency(), Currency::ZAR);
    }

    #[test]
    fn test_approved_for_payment() {
        let at = Utc::now();
        let claims = vec![
            claim_at(10, dec!(100), WorkflowAction::AutoApprove, at),
            claim_at(40, dec!(100), WorkflowAction::RouteToManager, at),
        ];
        assert_eq!(ClaimReporter::approved_for_payment(&claims).len(), 1);
    }
}
