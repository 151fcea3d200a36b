//! Adapters implementing application ports

mod carddav_address_book_adapter;

pub use carddav_address_book_adapter::CardDavAddressBookAdapter;
