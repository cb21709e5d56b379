use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ListResult<T: Serialize> {
    pub total: usize,
    pub records: Vec<T>,
}

impl<T: Serialize> From<Vec<T>> for ListResult<T> {
    fn from(val: Vec<T>) -> Self {
        ListResult {
            total: val.len(),
            records: val,
        }
    }
}

#[test]
fn test_list_result_total_matches_records() {
    let res: ListResult<u32> = vec![1, 2, 3].into();
    assert_eq!(res.total, 3);
    assert_eq!(res.records, vec![1, 2, 3]);
}
