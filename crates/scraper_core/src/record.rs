/// One decoded entity from a polled payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub pos_x: i64,
    pub pos_y: i64,
    pub available: bool,
}

impl Record {
    pub fn new(id: impl Into<String>, pos_x: i64, pos_y: i64, available: bool) -> Self {
        Self {
            id: id.into(),
            pos_x,
            pos_y,
            available,
        }
    }

    /// Score used in the availability index.
    pub fn index_score(&self) -> u8 {
        u8::from(self.available)
    }

    /// Hash fields in write order. `Available` uses the same 0/1 coercion as the score.
    pub fn hash_fields(&self) -> [(&'static str, String); 4] {
        [
            ("ID", self.id.clone()),
            ("PosX", self.pos_x.to_string()),
            ("PosY", self.pos_y.to_string()),
            ("Available", self.index_score().to_string()),
        ]
    }
}
