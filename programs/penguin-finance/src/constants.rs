/// PDA seeds used throughout the program for account derivation
pub mod seeds {
    /// Seed for the program state account
    pub const STATE: &[u8] = b"state";
}

/// Size of the Anchor account discriminator prefix
pub const ANCHOR_DISCRIMINATOR_SIZE: usize = 8;
