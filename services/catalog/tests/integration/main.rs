
mod account_test;
mod affiliation_test;
mod book_test;
mod login_test;
mod router_test;
