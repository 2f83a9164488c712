mod client;

pub use client::Where2MeetClient;
