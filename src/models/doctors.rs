use crate::schema::doctors;

#[derive(Queryable)]
pub struct Doctor {
    pub did: u64,
    pub uid: u64,
    pub department: String,
    pub title: String,
    pub information: String,
}

#[derive(Insertable)]
#[table_name = "doctors"]
pub struct NewDoctor {
    pub uid: u64,
    pub department: String,
    pub title: String,
    pub information: String,
}
