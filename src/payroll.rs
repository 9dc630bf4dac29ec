//! Payslip computation
//!
//! Pure integer arithmetic over cents; no storage, no I/O. Rules:
//! gross = base + allowances + overtime, an absence deduction
//! proportional to unpaid leave days, social insurance on base pay, and
//! a flat tax on the taxable remainder above a monthly exemption. Net is
//! floored at zero.

use serde::{Deserialize, Serialize};

use crate::error::{HrgateError, Result};

/// Social insurance: 7% of base pay
const INSURANCE_RATE_PCT: u64 = 7;
/// Income tax: 10% of taxable pay above the exemption
const TAX_RATE_PCT: u64 = 10;
/// Monthly tax exemption, in cents
const TAX_EXEMPTION_CENTS: u64 = 30_000;

/// Inputs for one pay period, all money in cents
#[derive(Debug, Clone, Deserialize)]
pub struct PayslipInput {
    pub base_salary: u64,
    pub allowances: u64,
    pub overtime_hours: u64,
    pub overtime_rate: u64,
    pub unpaid_leave_days: u64,
    /// Working days in the period; must be non-zero
    pub working_days: u64,
}

/// A computed payslip, all money in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payslip {
    pub gross: u64,
    pub absence_deduction: u64,
    pub insurance: u64,
    pub tax: u64,
    pub net: u64,
}

fn overflow() -> HrgateError {
    HrgateError("Payslip amounts overflow".into())
}

fn pct(amount: u64, rate: u64) -> Result<u64> {
    // Round half up at cent precision
    let scaled = amount.checked_mul(rate).ok_or_else(overflow)?;
    Ok(scaled.checked_add(50).ok_or_else(overflow)? / 100)
}

/// Compute a payslip. Deterministic; errors only on impossible inputs
/// (zero working days, more unpaid leave than working days, amounts
/// that overflow u64 cents).
pub fn compute_payslip(input: &PayslipInput) -> Result<Payslip> {
    if input.working_days == 0 {
        return Err(HrgateError("working_days must be non-zero".into()));
    }
    if input.unpaid_leave_days > input.working_days {
        return Err(HrgateError(
            "unpaid_leave_days exceeds working_days".into(),
        ));
    }

    let overtime = input
        .overtime_hours
        .checked_mul(input.overtime_rate)
        .ok_or_else(overflow)?;
    let gross = input
        .base_salary
        .checked_add(input.allowances)
        .and_then(|g| g.checked_add(overtime))
        .ok_or_else(overflow)?;

    let absence_deduction = input
        .base_salary
        .checked_mul(input.unpaid_leave_days)
        .and_then(|a| a.checked_add(input.working_days / 2))
        .ok_or_else(overflow)?
        / input.working_days;

    let insurance = pct(input.base_salary, INSURANCE_RATE_PCT)?;

    let taxable = gross.saturating_sub(insurance);
    let tax = pct(taxable.saturating_sub(TAX_EXEMPTION_CENTS), TAX_RATE_PCT)?;

    let net = gross
        .saturating_sub(absence_deduction)
        .saturating_sub(insurance)
        .saturating_sub(tax);

    Ok(Payslip {
        gross,
        absence_deduction,
        insurance,
        tax,
        net,
    })
}
