//! Implementation of the token ledger behind the NFT contract.
//!
//! The eponymous [`Erc721`] type owns every piece of mutable contract state:
//! the token-id-to-owner map, per-account balances, per-token metadata URIs,
//! the supply counter and the pause flag. It is intended to be inherited by
//! an entrypoint contract type, which binds caller identity and admin
//! authorization to the operations defined here.
//!
//! You can configure the collection via the [`Erc721Params`] trait, which
//! allows specifying the name and symbol.
//!
//! Note that this code is unaudited and not fit for production use.

use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use core::marker::PhantomData;
use stylus_sdk::{prelude::*, stylus_core};

pub trait Erc721Params {
    /// Immutable NFT name.
    const NAME: &'static str;

    /// Immutable NFT symbol.
    const SYMBOL: &'static str;
}

sol_storage! {
    /// Erc721 holds the ownership ledger and the pause switch.
    pub struct Erc721<T: Erc721Params> {
        /// Token id to owner map. Unminted and burned ids map to the zero address.
        mapping(uint256 => address) owners;
        /// User to token count map
        mapping(address => uint256) balances;
        /// Token id to metadata URI map, written once at mint
        mapping(uint256 => string) token_uris;
        /// Next id to assign. Ids are sequential and never reused, even after burns.
        uint256 next_token_id;
        /// Count of tokens that exist and have not been burned
        uint256 total_supply;
        /// The account allowed to burn tokens and flip the pause switch
        address admin;
        /// Whether minting and transfers are suspended
        bool paused;
        /// Used to allow [`Erc721Params`]
        PhantomData<T> phantom;
    }
}

// Declare events and Solidity error types
sol! {
    event Transfer(address indexed from, address indexed to, uint256 indexed token_id);
    event Paused(address account);
    event Unpaused(address account);

    // Minting or transferring attempted while the contract is paused
    #[derive(Debug)]
    error ContractPaused();
    // The specified address is not the owner of the specified token id
    #[derive(Debug)]
    error NotOwner(address from, uint256 token_id, address real_owner);
    // A privileged call was attempted by an account other than the admin
    #[derive(Debug)]
    error NotAdmin(address account);
    // Token id has not been minted, or it has been burned
    #[derive(Debug)]
    error UnknownToken(uint256 token_id);
    // The owner passed to a burn does not match the recorded owner
    #[derive(Debug)]
    error OwnerMismatch(uint256 token_id, address expected, address actual);
    // Attempt to transfer token id to the zero address
    #[derive(Debug)]
    error TransferToZero(uint256 token_id);
}

/// Represents the ways methods may fail.
#[derive(SolidityError, Debug)]
pub enum Erc721Error {
    ContractPaused(ContractPaused),
    NotOwner(NotOwner),
    NotAdmin(NotAdmin),
    UnknownToken(UnknownToken),
    OwnerMismatch(OwnerMismatch),
    TransferToZero(TransferToZero),
}

// These methods aren't public, but are helpers used by public methods.
// Methods marked as "pub" here are usable outside of the erc721 module (i.e. they're callable from lib.rs).
impl<T: Erc721Params> Erc721<T> {
    /// Requires that msg_sender is the contract admin.
    pub fn require_admin(&self) -> Result<(), Erc721Error> {
        let sender = self.vm().msg_sender();
        if sender != self.admin.get() {
            return Err(Erc721Error::NotAdmin(NotAdmin { account: sender }));
        }
        Ok(())
    }

    /// Requires that the pause switch is off.
    fn require_not_paused(&self) -> Result<(), Erc721Error> {
        if self.paused.get() {
            return Err(Erc721Error::ContractPaused(ContractPaused {}));
        }
        Ok(())
    }

    /// Looks up the owner of `token_id`, failing if it was never minted or has been burned.
    fn owner_of_inner(&self, token_id: U256) -> Result<Address, Erc721Error> {
        let owner = self.owners.get(token_id);
        if owner.is_zero() {
            return Err(Erc721Error::UnknownToken(UnknownToken { token_id }));
        }
        Ok(owner)
    }

    /// Mints a token carrying `metadata_uri` to `to` and returns its id.
    pub fn mint(&mut self, to: Address, metadata_uri: String) -> Result<U256, Erc721Error> {
        self.require_not_paused()?;

        let token_id = self.next_token_id.get();
        self.next_token_id.set(token_id + U256::from(1));

        self.owners.setter(token_id).set(to);
        self.token_uris.setter(token_id).set_str(&metadata_uri);

        let mut to_balance = self.balances.setter(to);
        let balance = to_balance.get() + U256::from(1);
        to_balance.set(balance);

        self.total_supply.set(self.total_supply.get() + U256::from(1));

        stylus_core::log(
            self.vm(),
            Transfer {
                from: Address::ZERO,
                to,
                token_id,
            },
        );
        Ok(token_id)
    }

    /// Transfers `token_id` from `from` to `to`.
    /// Every precondition is checked before the first storage write, so a
    /// failed transfer leaves the ledger untouched.
    pub fn transfer(&mut self, token_id: U256, from: Address, to: Address) -> Result<(), Erc721Error> {
        self.require_not_paused()?;

        let owner = self.owner_of_inner(token_id)?;
        if owner != from {
            return Err(Erc721Error::NotOwner(NotOwner {
                from,
                token_id,
                real_owner: owner,
            }));
        }
        // the zero address doubles as the burned sentinel, so transfers must not target it
        if to.is_zero() {
            return Err(Erc721Error::TransferToZero(TransferToZero { token_id }));
        }

        self.owners.setter(token_id).set(to);

        let mut from_balance = self.balances.setter(from);
        let balance = from_balance.get() - U256::from(1);
        from_balance.set(balance);

        let mut to_balance = self.balances.setter(to);
        let balance = to_balance.get() + U256::from(1);
        to_balance.set(balance);

        stylus_core::log(self.vm(), Transfer { from, to, token_id });
        Ok(())
    }

    /// Burns `token_id` after checking it is currently owned by `expected_owner`.
    /// The recorded owner is authoritative; `expected_owner` is an integrity
    /// check supplied by the caller.
    pub fn burn(&mut self, token_id: U256, expected_owner: Address) -> Result<(), Erc721Error> {
        let owner = self.owner_of_inner(token_id)?;
        if owner != expected_owner {
            return Err(Erc721Error::OwnerMismatch(OwnerMismatch {
                token_id,
                expected: expected_owner,
                actual: owner,
            }));
        }
        self.burn_token(token_id, owner);
        Ok(())
    }

    /// Burns every token that currently exists. A no-op on an empty ledger,
    /// so calling it twice in succession is safe.
    pub fn burn_all(&mut self) {
        let minted = self.next_token_id.get();
        let mut token_id = U256::ZERO;
        while token_id < minted {
            let owner = self.owners.get(token_id);
            if !owner.is_zero() {
                self.burn_token(token_id, owner);
            }
            token_id += U256::from(1);
        }
    }

    /// Removes `token_id` from the ledger. The caller must have verified that
    /// `owner` is the current owner.
    fn burn_token(&mut self, token_id: U256, owner: Address) {
        self.owners.delete(token_id);
        self.token_uris.delete(token_id);

        let mut owner_balance = self.balances.setter(owner);
        let balance = owner_balance.get() - U256::from(1);
        owner_balance.set(balance);

        self.total_supply.set(self.total_supply.get() - U256::from(1));

        stylus_core::log(
            self.vm(),
            Transfer {
                from: owner,
                to: Address::ZERO,
                token_id,
            },
        );
    }

    /// Flips the pause switch. Pausing twice returns the contract to normal
    /// operation; this is a toggle, not a one-way latch.
    pub fn toggle_pause(&mut self) {
        let account = self.vm().msg_sender();
        if self.paused.get() {
            self.paused.set(false);
            stylus_core::log(self.vm(), Unpaused { account });
        } else {
            self.paused.set(true);
            stylus_core::log(self.vm(), Paused { account });
        }
    }
}

// these methods are public to other contracts
#[public]
impl<T: Erc721Params> Erc721<T> {
    /// Immutable NFT name.
    pub fn name() -> Result<String, Erc721Error> {
        Ok(T::NAME.into())
    }

    /// Immutable NFT symbol.
    pub fn symbol() -> Result<String, Erc721Error> {
        Ok(T::SYMBOL.into())
    }

    /// The metadata URI supplied when the token was minted.
    #[selector(name = "tokenURI")]
    pub fn token_uri(&self, token_id: U256) -> Result<String, Erc721Error> {
        self.owner_of_inner(token_id)?; // require NFT exist
        Ok(self.token_uris.getter(token_id).get_string())
    }

    /// Gets the owner of the NFT, if it exists.
    pub fn owner_of(&self, token_id: U256) -> Result<Address, Erc721Error> {
        self.owner_of_inner(token_id)
    }

    /// The account allowed to burn tokens and toggle the pause switch.
    pub fn admin(&self) -> Result<Address, Erc721Error> {
        Ok(self.admin.get())
    }
}
