mod helpers;
mod http_test;
mod product_test;
