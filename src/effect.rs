//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// GET one catalog entry; the completion carries `request` back
    FetchPokemon { request: u64, url: String },
    /// Download and decode the sprite of record `id`
    LoadSprite { id: u32, url: String },
}
