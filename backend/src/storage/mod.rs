pub mod traits;

pub use traits::BookingStore;
