use super::{Account, AccountError, Operation};

use std::str::FromStr;

use anyhow::Result;
use chrono::Local;
use proptest::prelude::*;

use crate::types::Monetary;

fn money(value: &str) -> Result<Monetary> {
    Ok(Monetary::from_str(value)?)
}

fn create_accounts() -> Result<(Account, Account)> {
    let source = Account::new("12345-6", money("100.00")?)?;
    let destination = Account::new("78901-2", money("50.00")?)?;

    Ok((source, destination))
}

#[test]
fn test_new_account_starts_unsaved_and_dated_today() -> Result<()> {
    let account = Account::new("12345-6", money("100.00")?)?;

    assert_eq!(account.id(), None);
    assert_eq!(account.account_number(), "12345-6");
    assert_eq!(account.balance(), money("100.00")?);
    assert_eq!(account.created_on(), Local::now().date_naive());

    Ok(())
}

#[test]
fn test_new_account_trims_account_number() -> Result<()> {
    let account = Account::new("  12345-6 ", Monetary::zero())?;

    assert_eq!(account.account_number(), "12345-6");

    Ok(())
}

#[test]
fn test_new_account_rejects_blank_or_oversized_number() -> Result<()> {
    assert!(matches!(Account::new("", Monetary::zero()), Err(AccountError::InvalidAccountNumber { .. })));
    assert!(matches!(Account::new("   ", Monetary::zero()), Err(AccountError::InvalidAccountNumber { .. })));
    assert!(matches!(Account::new(&"9".repeat(21), Monetary::zero()), Err(AccountError::InvalidAccountNumber { .. })));
    assert!(Account::new(&"9".repeat(20), Monetary::zero()).is_ok());

    Ok(())
}

#[test]
fn test_new_account_rejects_negative_initial_balance() -> Result<()> {
    let result = Account::new("12345-6", money("-0.01")?);

    assert!(matches!(result, Err(AccountError::NegativeInitialBalance { .. })));

    Ok(())
}

#[test]
fn test_successful_deposit_updates_balance() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    account.deposit(money("50.00")?)?;

    assert_eq!(account.balance(), money("150.00")?);

    Ok(())
}

#[test]
fn test_deposit_rejects_zero_and_negative_amounts() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    let zero = account.deposit(Monetary::zero());
    let negative = account.deposit(money("-10.00")?);

    assert_eq!(zero, Err(AccountError::invalid_amount(Operation::Deposit, Monetary::zero())));
    assert!(matches!(negative, Err(AccountError::InvalidAmount { operation: Operation::Deposit, .. })));
    assert_eq!(account.balance(), money("100.00")?);

    Ok(())
}

#[test]
fn test_successful_withdrawal_updates_balance() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    account.withdraw(money("30.00")?)?;

    assert_eq!(account.balance(), money("70.00")?);

    Ok(())
}

#[test]
fn test_withdrawal_with_exact_funds_succeeds() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    account.withdraw(money("100.00")?)?;

    assert!(account.balance().is_zero());

    Ok(())
}

#[test]
fn test_withdrawal_with_insufficient_funds_fails() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    let result = account.withdraw(money("150.00")?);

    assert!(matches!(result, Err(AccountError::InsufficientFunds { .. })));
    assert_eq!(account.balance(), money("100.00")?);

    Ok(())
}

#[test]
fn test_withdrawal_rejects_zero_and_negative_amounts() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    assert!(matches!(account.withdraw(Monetary::zero()), Err(AccountError::InvalidAmount { operation: Operation::Withdrawal, .. })));
    assert!(matches!(account.withdraw(money("-10.00")?), Err(AccountError::InvalidAmount { operation: Operation::Withdrawal, .. })));
    assert_eq!(account.balance(), money("100.00")?);

    Ok(())
}

#[test]
fn test_successful_transfer_moves_funds() -> Result<()> {
    let (mut source, mut destination) = create_accounts()?;

    source.transfer(Some(&mut destination), money("40.00")?)?;

    assert_eq!(source.balance(), money("60.00")?);
    assert_eq!(destination.balance(), money("90.00")?);

    Ok(())
}

#[test]
fn test_transfer_with_insufficient_funds_changes_neither_account() -> Result<()> {
    let (mut source, mut destination) = create_accounts()?;

    let result = source.transfer(Some(&mut destination), money("120.00")?);

    assert!(matches!(result, Err(AccountError::InsufficientFunds { .. })));
    assert_eq!(source.balance(), money("100.00")?);
    assert_eq!(destination.balance(), money("50.00")?);

    Ok(())
}

#[test]
fn test_transfer_rejects_zero_and_negative_amounts() -> Result<()> {
    let (mut source, mut destination) = create_accounts()?;

    let zero = source.transfer(Some(&mut destination), Monetary::zero());
    let negative = source.transfer(Some(&mut destination), money("-10.00")?);

    assert!(matches!(zero, Err(AccountError::InvalidAmount { operation: Operation::Transfer, .. })));
    assert!(matches!(negative, Err(AccountError::InvalidAmount { operation: Operation::Transfer, .. })));
    assert_eq!(source.balance(), money("100.00")?);
    assert_eq!(destination.balance(), money("50.00")?);

    Ok(())
}

#[test]
fn test_transfer_to_missing_destination_fails() -> Result<()> {
    let (mut source, _) = create_accounts()?;

    let result = source.transfer(None, money("10.00")?);

    assert!(matches!(result, Err(AccountError::InvalidDestination { .. })));
    assert_eq!(source.balance(), money("100.00")?);

    Ok(())
}

#[test]
fn test_transfer_reverts_withdrawal_when_destination_overflows() -> Result<()> {
    let (mut source, _) = create_accounts()?;
    let mut destination = Account::new("78901-2", Monetary::from_decimal(rust_decimal::Decimal::MAX)?)?;

    let result = source.transfer(Some(&mut destination), money("10.00")?);

    assert!(matches!(result, Err(AccountError::Overflow { operation: Operation::Transfer, .. })));
    assert_eq!(source.balance(), money("100.00")?);

    Ok(())
}

#[test]
fn test_transfer_to_self_validates_without_changing_balance() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    account.transfer_to_self(money("40.00")?)?;

    assert_eq!(account.balance(), money("100.00")?);
    assert!(matches!(account.transfer_to_self(money("100.01")?), Err(AccountError::InsufficientFunds { .. })));
    assert!(matches!(account.transfer_to_self(Monetary::zero()), Err(AccountError::InvalidAmount { .. })));

    Ok(())
}

#[test]
fn test_error_messages_name_the_rejected_operation() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    let error = account.withdraw(Monetary::zero()).err().ok_or_else(|| anyhow::anyhow!("expected an error"))?;

    assert_eq!(error.to_string(), "Invalid withdrawal amount [0.00]: must be positive");

    Ok(())
}

#[test]
fn test_identity_is_the_persistent_id() -> Result<()> {
    let (mut first, mut second) = create_accounts()?;
    let unsaved = first.clone();

    assert_ne!(first, unsaved);

    first.assign_id(7);
    second.assign_id(7);

    assert_eq!(first, second);
    assert_ne!(first.balance(), second.balance());

    Ok(())
}

#[test]
fn test_assigned_id_is_immutable() -> Result<()> {
    let (mut account, _) = create_accounts()?;

    account.assign_id(1);
    account.assign_id(2);

    assert_eq!(account.id(), Some(1));

    Ok(())
}

#[derive(Debug, Clone)]
enum Step {
    Deposit(i64),
    Withdraw(i64),
    Transfer(i64)
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (-500i64..50_000).prop_map(Step::Deposit),
        (-500i64..50_000).prop_map(Step::Withdraw),
        (-500i64..50_000).prop_map(Step::Transfer)
    ]
}

proptest! {
    #[test]
    fn test_balances_stay_non_negative_and_total_is_conserved(steps in proptest::collection::vec(step_strategy(), 1..64)) {
        let mut source = Account::new("12345-6", Monetary::from_minor_units(10_000))?;
        let mut destination = Account::new("78901-2", Monetary::from_minor_units(5_000))?;
        let mut external = 0i64;

        for step in steps {
            let before = (source.balance(), destination.balance());

            let result = match step {
                Step::Deposit(units) => source.deposit(Monetary::from_minor_units(units)).map(|_| external += units),
                Step::Withdraw(units) => source.withdraw(Monetary::from_minor_units(units)).map(|_| external -= units),
                Step::Transfer(units) => source.transfer(Some(&mut destination), Monetary::from_minor_units(units))
            };

            if result.is_err() {
                prop_assert_eq!(before, (source.balance(), destination.balance()));
            }

            prop_assert!(!source.balance().is_negative());
            prop_assert!(!destination.balance().is_negative());
        }

        let total = source.balance().checked_add(destination.balance())
            .ok_or_else(|| TestCaseError::fail("Balances overflowed when summed"))?;
        prop_assert_eq!(total, Monetary::from_minor_units(15_000 + external));
    }

    #[test]
    fn test_deposit_then_withdraw_restores_balance(units in 1i64..1_000_000) {
        let (mut account, _) = create_accounts().map_err(|error| TestCaseError::fail(error.to_string()))?;
        let amount = Monetary::from_minor_units(units);

        account.deposit(amount)?;
        account.withdraw(amount)?;

        prop_assert_eq!(account.balance(), Monetary::from_minor_units(10_000));
    }
}
