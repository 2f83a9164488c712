pub mod where2meet;
