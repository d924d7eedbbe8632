mod recency_list;

pub(crate) use recency_list::{RecencyList, SlotId};
