/// Item identifiers are opaque strings: minted by the service, by the client
/// on offline fallback, or supplied by the caller.
pub type ItemId = String;
