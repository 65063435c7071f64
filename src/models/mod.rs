pub mod deck;
pub mod flashcard;
pub mod leitner;
pub mod session;

pub use deck::Deck;
pub use flashcard::Flashcard;
pub use session::ReviewSession;
