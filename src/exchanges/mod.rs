pub mod btcx;
