use serde::Serialize;
use serde::de::DeserializeOwned;

/// Static binding between a logical entity kind and its storage shape.
///
/// Implementing this trait is all a type needs to become storable: a kind
/// name (which also names the kind's listing index), a key derivation, and
/// optionally fixture data for first-run seeding. No entity-specific
/// storage logic lives anywhere else; per-feature behavior is expressed as
/// plain closures passed to `mutate`.
pub trait Entity:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Entity kind name, e.g. `"blogPost"`. Shared by all records of the
    /// kind and by the kind's index record.
    const KIND: &'static str;

    /// Derive the record key from a value. Most kinds key on their `id`
    /// field; kinds with a natural handle may override that, e.g. a blog post
    /// keys on its slug.
    fn storage_key(&self) -> String;

    /// Fixture values inserted once, when the kind's index is first
    /// observed empty.
    fn seed_data() -> Vec<Self> {
        Vec::new()
    }
}
