pub mod kontoudskrift;
