//! # Account Client
//!
//! Provides a high‑level API for interacting with the `Account` actor.
use crate::account_actor::{AccountAction, AccountActionResult, AccountError};
use crate::model::{Account, AccountCreate, AccountUpdate, MemberId, Money, RentalId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<AccountError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => AccountError::NotFound(id),
            Err(FrameworkError::AlreadyExists(id)) => AccountError::DuplicateMember(id),
            Err(other) => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl AccountClient {
    #[instrument(skip(self))]
    pub async fn register(&self, params: AccountCreate) -> Result<MemberId, AccountError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_account(
        &self,
        id: MemberId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    async fn act(
        &self,
        id: MemberId,
        action: AccountAction,
    ) -> Result<AccountActionResult, AccountError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Credits a positive amount. Returns the new balance.
    #[instrument(skip(self))]
    pub async fn add_funds(&self, id: MemberId, amount: Money) -> Result<Money, AccountError> {
        match self.act(id, AccountAction::AddFunds(amount)).await? {
            AccountActionResult::AddFunds(balance) => Ok(balance),
            other => Err(unexpected(other)),
        }
    }

    /// Debits `amount` if the balance covers it. Returns the new balance.
    #[instrument(skip(self))]
    pub async fn deduct_funds(&self, id: MemberId, amount: Money) -> Result<Money, AccountError> {
        match self.act(id, AccountAction::DeductFunds(amount)).await? {
            AccountActionResult::DeductFunds(balance) => Ok(balance),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn claim_rental(&self, id: MemberId) -> Result<(), AccountError> {
        debug!("Claiming account for rent");
        match self.act(id, AccountAction::ClaimRental).await? {
            AccountActionResult::ClaimRental(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_claim(&self, id: MemberId) -> Result<(), AccountError> {
        match self.act(id, AccountAction::ReleaseClaim).await? {
            AccountActionResult::ReleaseClaim(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn start_rental(&self, id: MemberId, rental: RentalId) -> Result<(), AccountError> {
        match self.act(id, AccountAction::StartRental(rental)).await? {
            AccountActionResult::StartRental(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Holds `cost` against the open rental. Returns the balance after the hold.
    #[instrument(skip(self))]
    pub async fn begin_return(
        &self,
        id: MemberId,
        rental: RentalId,
        cost: Money,
    ) -> Result<Money, AccountError> {
        debug!("Holding rental cost");
        match self
            .act(id, AccountAction::BeginReturn { rental, cost })
            .await?
        {
            AccountActionResult::BeginReturn(balance) => Ok(balance),
            other => Err(unexpected(other)),
        }
    }

    /// Refunds the hold. Returns the balance.
    #[instrument(skip(self))]
    pub async fn abort_return(&self, id: MemberId) -> Result<Money, AccountError> {
        match self.act(id, AccountAction::AbortReturn).await? {
            AccountActionResult::AbortReturn(balance) => Ok(balance),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn end_rental(&self, id: MemberId) -> Result<RentalId, AccountError> {
        match self.act(id, AccountAction::EndRental).await? {
            AccountActionResult::EndRental(rental) => Ok(rental),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: AccountActionResult) -> AccountError {
    AccountError::ActorCommunicationError(format!("unexpected response: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_begin_return_sends_cost() {
        let (client, mut receiver) = create_mock_client::<Account>(10);
        let account_client = AccountClient::new(client);

        let task = tokio::spawn(async move {
            account_client
                .begin_return(MemberId::from("M-1"), RentalId(4), Money::from_cents(225))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, MemberId::from("M-1"));
        match action {
            AccountAction::BeginReturn { rental, cost } => {
                assert_eq!(rental, RentalId(4));
                assert_eq!(cost, Money::from_cents(225));
            }
            other => panic!("Expected BeginReturn, got {other:?}"),
        }
        responder
            .send(Ok(AccountActionResult::BeginReturn(Money::from_cents(775))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Money::from_cents(775));
    }

    #[tokio::test]
    async fn test_claim_conflict_keeps_its_type() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_action(MemberId::from("M-1"))
            .return_err(FrameworkError::EntityError(Box::new(
                AccountError::AlreadyRenting(MemberId::from("M-1")),
            )));

        let client = AccountClient::new(mock.client());
        assert_eq!(
            client.claim_rental(MemberId::from("M-1")).await,
            Err(AccountError::AlreadyRenting(MemberId::from("M-1")))
        );
    }

    #[tokio::test]
    async fn test_mismatched_result_is_reported() {
        let (client, mut receiver) = create_mock_client::<Account>(10);
        let account_client = AccountClient::new(client);

        let task =
            tokio::spawn(async move { account_client.end_rental(MemberId::from("M-1")).await });
        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Ok(AccountActionResult::ClaimRental(())))
            .unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(AccountError::ActorCommunicationError(_))
        ));
    }
}
