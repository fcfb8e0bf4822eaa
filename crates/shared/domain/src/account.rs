//! Account domain entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::is_valid_balance;
use crate::entity::{Entity, EntityId};
use crate::error::{DomainError, DomainResult};

/// Account domain entity.
///
/// Holds a non-negative balance. Fields are private: the only way to obtain
/// an `Account` is [`Account::create`], and every balance mutation
/// re-validates before it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: EntityId,
    balance: Decimal,
}

/// Account creation parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAccount {
    /// Existing id (generated when absent)
    pub id: Option<EntityId>,
    /// Opening balance (must be >= 0)
    pub balance: Decimal,
}

/// Plain projection of an account (safe to store or return to clients)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountProps {
    /// Account identifier
    pub id: EntityId,
    /// Current balance
    pub balance: Decimal,
}

impl Account {
    /// Validating factory
    pub fn create(params: CreateAccount) -> DomainResult<Self> {
        if !is_valid_balance(params.balance) {
            return Err(DomainError::InvalidBalance(params.balance));
        }

        Ok(Self {
            id: EntityId::or_generate(params.id),
            balance: params.balance,
        })
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Add `amount` to the balance
    pub fn deposit(&mut self, amount: Decimal) -> DomainResult<Decimal> {
        if amount < Decimal::ZERO {
            return Err(DomainError::InvalidAmount(amount));
        }
        self.apply(self.balance + amount)
    }

    /// Remove `amount` from the balance, refusing to overdraw
    pub fn withdraw(&mut self, amount: Decimal) -> DomainResult<Decimal> {
        if amount < Decimal::ZERO {
            return Err(DomainError::InvalidAmount(amount));
        }
        self.apply(self.balance - amount)
    }

    fn apply(&mut self, balance: Decimal) -> DomainResult<Decimal> {
        if !is_valid_balance(balance) {
            return Err(DomainError::InvalidBalance(balance));
        }
        self.balance = balance;
        Ok(balance)
    }

    /// Project into plain props
    pub fn marshal(&self) -> AccountProps {
        AccountProps {
            id: self.id.clone(),
            balance: self.balance,
        }
    }
}

impl Entity for Account {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl TryFrom<AccountProps> for Account {
    type Error = DomainError;

    fn try_from(props: AccountProps) -> DomainResult<Self> {
        Account::create(CreateAccount {
            id: Some(props.id),
            balance: props.balance,
        })
    }
}

impl From<&Account> for AccountProps {
    fn from(account: &Account) -> Self {
        account.marshal()
    }
}
