use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;

/// Randomness adapter state PDA.
///
/// Issues request ids, remembers the last one, and pins the oracle key
/// allowed to deliver fulfillments. Knows nothing about wagers.
#[account]
#[derive(Default)]
pub struct RngState {
    /// Key that signs `fulfill_randomness`.
    pub oracle_authority: Pubkey,

    /// Id handed to the next request. Starts at 1.
    pub next_request_id: u64,

    /// Most recently issued id (0 = none yet).
    pub last_request_id: u64,

    /// Requests issued but not yet fulfilled.
    pub outstanding: u32,

    pub total_fulfilled: u64,

    /// PDA bump.
    pub bump: u8,

    pub _reserved: [u8; 16],
}

impl RngState {
    pub const SEED: &'static [u8] = b"rng";

    pub const SIZE: usize =
        32 + // oracle_authority
            8 +  // next_request_id
            8 +  // last_request_id
            4 +  // outstanding
            8 +  // total_fulfilled
            1 +  // bump
            16;  // reserved

    pub fn init(&mut self, oracle_authority: Pubkey, bump: u8) {
        self.oracle_authority = oracle_authority;
        self.next_request_id = 1;
        self.last_request_id = 0;
        self.outstanding = 0;
        self.total_fulfilled = 0;
        self.bump = bump;
        self._reserved = [0; 16];
    }

    /// True if `request_id` was handed out by this adapter.
    pub fn has_issued(&self, request_id: u64) -> bool {
        request_id != 0 && request_id < self.next_request_id
    }

    /// Opens `request` under the next id and returns that id.
    pub fn issue(
        &mut self,
        request: &mut RandomnessRequest,
        wager: Pubkey,
        seed: [u8; 32],
        now: i64,
        slot: u64,
        bump: u8,
    ) -> Result<u64> {
        let id = self.next_request_id;

        request.request_id = id;
        request.wager = wager;
        request.seed = seed;
        request.status = RequestStatus::Pending;
        request.randomness = [0u8; 32];
        request.requested_at = now;
        request.requested_slot = slot;
        request.fulfilled_at = 0;
        request.bump = bump;

        self.next_request_id = id.checked_add(1).ok_or(CryptoHandsError::MathOverflow)?;
        self.last_request_id = id;
        self.outstanding = self.outstanding.saturating_add(1);

        Ok(id)
    }

    /// Checks that `request` is the account this adapter issued under
    /// `request_id`.
    pub fn verify(&self, request: &RandomnessRequest, request_id: u64) -> Result<()> {
        require!(self.has_issued(request_id), CryptoHandsError::UnrecognizedRequest);
        require_eq!(request.request_id, request_id, CryptoHandsError::UnrecognizedRequest);
        Ok(())
    }

    /// Records a delivered value. Forwarding to the engine is the caller's job.
    pub fn fulfill(
        &mut self,
        request: &mut RandomnessRequest,
        request_id: u64,
        randomness: [u8; 32],
        now: i64,
    ) -> Result<()> {
        self.verify(request, request_id)?;

        if request.status == RequestStatus::Pending {
            self.outstanding = self.outstanding.saturating_sub(1);
            self.total_fulfilled = self.total_fulfilled.saturating_add(1);
        }

        request.status = RequestStatus::Fulfilled;
        request.randomness = randomness;
        request.fulfilled_at = now;
        Ok(())
    }

    /// Withdraws a pending request whose wager gave up waiting. A later
    /// delivery for it no longer maps to anything.
    pub fn cancel(&mut self, request: &mut RandomnessRequest) -> Result<()> {
        require!(request.status == RequestStatus::Pending, CryptoHandsError::AlreadyResolved);

        self.outstanding = self.outstanding.saturating_sub(1);
        request.status = RequestStatus::Cancelled;
        request.unlink();
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestStatus {
    /// Waiting for the oracle.
    #[default]
    Pending,
    /// Oracle delivered `randomness`.
    Fulfilled,
    /// Dropped after the wager timed out.
    Cancelled,
}

/// One randomness request, keyed by the adapter-assigned id.
///
/// Seeds: `["request", request_id.to_le_bytes()]`
#[account]
#[derive(Default)]
pub struct RandomnessRequest {
    pub request_id: u64,

    /// Wager waiting on this request. Default key once the engine has
    /// dropped the mapping (wager expired).
    pub wager: Pubkey,

    /// Entropy handed to the oracle.
    pub seed: [u8; 32],

    pub status: RequestStatus,

    /// Delivered value, zero until fulfilled.
    pub randomness: [u8; 32],

    pub requested_at: i64,
    pub requested_slot: u64,
    pub fulfilled_at: i64,

    pub bump: u8,
}

impl RandomnessRequest {
    pub const SEED_PREFIX: &'static [u8] = b"request";

    pub const SIZE: usize =
        8 +  // request_id
            32 + // wager
            32 + // seed
            1 +  // status
            32 + // randomness
            8 +  // requested_at
            8 +  // requested_slot
            8 +  // fulfilled_at
            1;   // bump

    pub fn maps_to(&self, wager: &Pubkey) -> bool {
        self.wager != Pubkey::default() && self.wager == *wager
    }

    /// Removes the request -> wager mapping.
    pub fn unlink(&mut self) {
        self.wager = Pubkey::default();
    }

    pub fn has_timed_out(&self, now: i64, timeout_secs: i64) -> bool {
        now.saturating_sub(self.requested_at) >= timeout_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{to_bytes, assert_err};

    fn adapter() -> RngState {
        let mut rng = RngState::default();
        rng.init(Pubkey::new_unique(), 255);
        rng
    }

    #[test]
    fn test_sizes() {
        let rng = adapter();
        assert_eq!(to_bytes(&rng).len(), RngState::SIZE);

        let req = RandomnessRequest::default();
        assert_eq!(to_bytes(&req).len(), RandomnessRequest::SIZE);
    }

    #[test]
    fn issue_tracks_last_request_id() {
        let mut rng = adapter();
        assert_eq!(rng.last_request_id, 0);

        let mut a = RandomnessRequest::default();
        let mut b = RandomnessRequest::default();
        let id_a = rng.issue(&mut a, Pubkey::new_unique(), [1; 32], 10, 100, 1).unwrap();
        let id_b = rng.issue(&mut b, Pubkey::new_unique(), [2; 32], 11, 101, 1).unwrap();

        assert_eq!((id_a, id_b), (1, 2));
        assert_eq!(rng.last_request_id, 2);
        assert_eq!(rng.outstanding, 2);
        assert_eq!(b.status, RequestStatus::Pending);
    }

    #[test]
    fn fulfill_rejects_ids_never_issued() {
        let mut rng = adapter();
        let mut req = RandomnessRequest::default();
        rng.issue(&mut req, Pubkey::new_unique(), [0; 32], 0, 0, 1).unwrap();

        assert_err(rng.fulfill(&mut req, 0, [9; 32], 5), CryptoHandsError::UnrecognizedRequest);
        assert_err(rng.fulfill(&mut req, 7, [9; 32], 5), CryptoHandsError::UnrecognizedRequest);
        assert_eq!(req.status, RequestStatus::Pending);
    }

    #[test]
    fn fulfill_rejects_mismatched_account() {
        let mut rng = adapter();
        let mut first = RandomnessRequest::default();
        let mut second = RandomnessRequest::default();
        rng.issue(&mut first, Pubkey::new_unique(), [0; 32], 0, 0, 1).unwrap();
        rng.issue(&mut second, Pubkey::new_unique(), [0; 32], 0, 0, 1).unwrap();

        assert_err(rng.fulfill(&mut first, 2, [9; 32], 5), CryptoHandsError::UnrecognizedRequest);
    }

    #[test]
    fn fulfill_stores_value() {
        let mut rng = adapter();
        let mut req = RandomnessRequest::default();
        let id = rng.issue(&mut req, Pubkey::new_unique(), [0; 32], 0, 0, 1).unwrap();

        rng.fulfill(&mut req, id, [7; 32], 42).unwrap();
        assert_eq!(req.status, RequestStatus::Fulfilled);
        assert_eq!(req.randomness, [7; 32]);
        assert_eq!(req.fulfilled_at, 42);
        assert_eq!(rng.outstanding, 0);
        assert_eq!(rng.total_fulfilled, 1);
    }

    #[test]
    fn cancel_releases_outstanding_slot() {
        let mut rng = adapter();
        let wager = Pubkey::new_unique();
        let mut req = RandomnessRequest::default();
        rng.issue(&mut req, wager, [0; 32], 0, 0, 1).unwrap();
        assert_eq!(rng.outstanding, 1);

        rng.cancel(&mut req).unwrap();
        assert_eq!(rng.outstanding, 0);
        assert_eq!(req.status, RequestStatus::Cancelled);
        assert!(!req.maps_to(&wager));
        assert_eq!(rng.total_fulfilled, 0);

        assert_err(rng.cancel(&mut req), CryptoHandsError::AlreadyResolved);
        assert_eq!(rng.outstanding, 0);
    }

    #[test]
    fn unlinked_request_maps_to_nothing() {
        let wager = Pubkey::new_unique();
        let mut req = RandomnessRequest { wager, ..Default::default() };
        assert!(req.maps_to(&wager));

        req.unlink();
        assert!(!req.maps_to(&wager));
        assert!(!req.maps_to(&Pubkey::default()));
    }

    #[test]
    fn timeout_is_inclusive() {
        let req = RandomnessRequest { requested_at: 100, ..Default::default() };
        assert!(!req.has_timed_out(159, 60));
        assert!(req.has_timed_out(160, 60));
    }
}
