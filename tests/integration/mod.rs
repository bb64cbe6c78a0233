mod helpers;

mod test_init;
mod test_license;
mod test_run;
mod test_targets;
