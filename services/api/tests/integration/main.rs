mod account_test;
mod helpers;
