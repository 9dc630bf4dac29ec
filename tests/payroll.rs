//! Payslip computation tests (pure arithmetic, no storage)

use hrgate::{compute_payslip, PayslipInput};

fn base_input() -> PayslipInput {
    PayslipInput {
        base_salary: 500_000, // 5000.00
        allowances: 50_000,
        overtime_hours: 0,
        overtime_rate: 0,
        unpaid_leave_days: 0,
        working_days: 22,
    }
}

#[test]
fn plain_month() {
    let slip = compute_payslip(&base_input()).unwrap();
    assert_eq!(slip.gross, 550_000);
    assert_eq!(slip.absence_deduction, 0);
    // 7% of base
    assert_eq!(slip.insurance, 35_000);
    // 10% of (550000 - 35000 - 30000)
    assert_eq!(slip.tax, 48_500);
    assert_eq!(slip.net, 550_000 - 35_000 - 48_500);
}

#[test]
fn overtime_raises_gross_and_tax() {
    let mut input = base_input();
    input.overtime_hours = 10;
    input.overtime_rate = 2_000;
    let slip = compute_payslip(&input).unwrap();
    assert_eq!(slip.gross, 570_000);

    let baseline = compute_payslip(&base_input()).unwrap();
    assert!(slip.tax > baseline.tax);
    assert!(slip.net > baseline.net);
}

#[test]
fn unpaid_leave_is_proportional_to_working_days() {
    let mut input = base_input();
    input.unpaid_leave_days = 11;
    let slip = compute_payslip(&input).unwrap();
    // Half the working days away deducts half the base
    assert_eq!(slip.absence_deduction, 250_000);
}

#[test]
fn below_exemption_pays_no_tax() {
    let input = PayslipInput {
        base_salary: 30_000,
        allowances: 0,
        overtime_hours: 0,
        overtime_rate: 0,
        unpaid_leave_days: 0,
        working_days: 22,
    };
    let slip = compute_payslip(&input).unwrap();
    assert_eq!(slip.tax, 0);
    assert_eq!(slip.net, slip.gross - slip.insurance);
}

#[test]
fn net_never_goes_negative() {
    let input = PayslipInput {
        base_salary: 10_000,
        allowances: 0,
        overtime_hours: 0,
        overtime_rate: 0,
        unpaid_leave_days: 22,
        working_days: 22,
    };
    let slip = compute_payslip(&input).unwrap();
    assert_eq!(slip.net, 0);
}

#[test]
fn deterministic() {
    let input = base_input();
    assert_eq!(
        compute_payslip(&input).unwrap(),
        compute_payslip(&input).unwrap()
    );
}

/// Amounts that cannot fit in u64 cents error out instead of wrapping
#[test]
fn overflowing_amounts_are_rejected() {
    let mut input = base_input();
    input.overtime_hours = u64::MAX;
    input.overtime_rate = 2;
    assert!(compute_payslip(&input).is_err());

    let mut input = base_input();
    input.base_salary = u64::MAX;
    input.allowances = u64::MAX;
    assert!(compute_payslip(&input).is_err());

    // Gross fits, but the absence product does not
    let mut input = base_input();
    input.base_salary = u64::MAX / 2;
    input.allowances = 0;
    input.unpaid_leave_days = 3;
    assert!(compute_payslip(&input).is_err());
}

#[test]
fn impossible_inputs_are_rejected() {
    let mut input = base_input();
    input.working_days = 0;
    assert!(compute_payslip(&input).is_err());

    let mut input = base_input();
    input.unpaid_leave_days = 23;
    assert!(compute_payslip(&input).is_err());
}
