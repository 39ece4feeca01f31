use slotmap::Key;

slotmap::new_key_type! {
    /// A key to access a clause stored in the clause database.
    ///
    /// Keys are versioned, so a key to a removed clause is never confused with a key to a clause later stored in the same slot.
    pub struct ClauseKey;
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ffi = self.data().as_ffi();
        write!(f, "c{}v{}", ffi & 0xffff_ffff, ffi >> 32)
    }
}
