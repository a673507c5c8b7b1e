use uuid::Uuid;

/// A source of identifiers for new vacation records.
pub trait IdGenerator {
    /// Produce an identifier that this generator has not produced before.
    fn next_id(&mut self) -> Uuid;
}

/// Random (version 4) UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic identifiers counting up from `00000000-…-0001`.
///
/// Useful wherever ids need to be predictable, such as in tests.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: u128,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.issued += 1;
        Uuid::from_u128(self.issued)
    }
}
