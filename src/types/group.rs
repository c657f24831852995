use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct RGroupCreate {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GroupCreateRes {
    pub id: String,
    pub message: String,
}
