mod share_tests;
mod slug_tests;
mod songs_tests;
