// Only run this as a WASM if the export-abi feature is not set.
#![cfg_attr(not(any(feature = "export-abi", test)), no_main)]
extern crate alloc;

// Modules and imports
pub mod erc721;

use crate::erc721::{Erc721, Erc721Error, Erc721Params};
use alloy_primitives::{Address, U256};
/// Import the Stylus SDK along with alloy primitive types for use in our program.
use stylus_sdk::prelude::*;

/// Immutable definitions
pub struct ExampleNFTParams;
impl Erc721Params for ExampleNFTParams {
    const NAME: &'static str = "ExampleNFT";
    const SYMBOL: &'static str = "EXN";
}

// Define the entrypoint as a Solidity storage object. The sol_storage! macro
// will generate Rust-equivalent structs with all fields mapped to Solidity-equivalent
// storage slots and types.
sol_storage! {
    #[entrypoint]
    pub struct ExampleNFT {
        #[borrow] // Allows erc721 to access ExampleNFT's storage and make calls
        Erc721<ExampleNFTParams> erc721;
    }
}

#[public]
#[inherit(Erc721<ExampleNFTParams>)]
impl ExampleNFT {
    /// The deployer becomes the admin: the only account allowed to burn
    /// tokens and toggle the pause switch.
    #[constructor]
    pub fn constructor(&mut self) {
        // Use tx_origin instead of msg_sender because deployment goes through a factory contract.
        let deployer = self.vm().tx_origin();
        self.erc721.admin.set(deployer);
    }

    /// Mints a token carrying `metadata_uri` to the sender and returns its id.
    pub fn mint(&mut self, metadata_uri: String) -> Result<U256, Erc721Error> {
        let minter = self.vm().msg_sender();
        self.erc721.mint(minter, metadata_uri)
    }

    /// Moves one of the sender's tokens to `to`.
    pub fn transfer_token(&mut self, to: Address, token_id: U256) -> Result<(), Erc721Error> {
        let from = self.vm().msg_sender();
        self.erc721.transfer(token_id, from, to)
    }

    /// Burns `token_id`, which must be owned by `owner`. Admin only.
    pub fn burn(&mut self, token_id: U256, owner: Address) -> Result<(), Erc721Error> {
        self.erc721.require_admin()?;
        self.erc721.burn(token_id, owner)
    }

    /// Burns every existing token. Admin only; calling it again on the
    /// emptied ledger is a no-op.
    pub fn burn_all(&mut self) -> Result<(), Erc721Error> {
        self.erc721.require_admin()?;
        self.erc721.burn_all();
        Ok(())
    }

    /// Flips the pause switch on or off. Admin only.
    pub fn pause_contract(&mut self) -> Result<(), Erc721Error> {
        self.erc721.require_admin()?;
        self.erc721.toggle_pause();
        Ok(())
    }

    /// Gets the number of NFTs owned by an account.
    pub fn balance_of(&self, owner: Address) -> Result<U256, Erc721Error> {
        Ok(self.erc721.balances.get(owner))
    }

    /// Count of tokens that exist and have not been burned.
    pub fn total_supply(&self) -> Result<U256, Erc721Error> {
        Ok(self.erc721.total_supply.get())
    }

    /// Whether minting and transfers are currently suspended.
    pub fn paused(&self) -> Result<bool, Erc721Error> {
        Ok(self.erc721.paused.get())
    }
}
