pub mod test_util;
mod test_startup;
