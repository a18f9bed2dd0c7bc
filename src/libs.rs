pub(crate) mod time_value;
