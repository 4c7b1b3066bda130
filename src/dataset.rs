//! The final flat table
//!
//! Columns: post_id, comment_id, comment_score, item, parent_item, adjective (blank when there
//! is none). One row per reconciled mention, no deduplication: the same pair mentioned twice in
//! one comment counts twice.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use crate::errors::*;
use crate::reconcile::ReconciledMention;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<ReconciledMention>,
}

impl Dataset {
    /// Concatenate per-post batches. Order carries no meaning; provenance is in the rows.
    pub fn assemble<I>(batches: I) -> Self
        where I: IntoIterator<Item=Vec<ReconciledMention>> {
        Dataset { rows: batches.into_iter().flatten().collect() }
    }

    pub fn rows(&self) -> &[ReconciledMention] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ReconciledMention> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_csv(File::create(path.as_ref())?)?;
        info!("Wrote {} rows to {}", self.rows.len(), path.as_ref().display());
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let rows = rdr.deserialize().collect::<::std::result::Result<Vec<_>, _>>()?;
        Ok(Dataset { rows })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| Error::MissingFile("dataset", Some(e)))?;
        Dataset::from_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(comment_id: &str, item: &str, adjective: Option<&str>) -> ReconciledMention {
        ReconciledMention {
            post_id: "p1".into(),
            comment_id: comment_id.into(),
            comment_score: 12,
            item: item.into(),
            parent_item: "jackets".into(),
            adjective: adjective.map(String::from),
        }
    }

    #[test]
    fn keeps_duplicates_and_provenance() {
        let dataset = Dataset::assemble(vec![
            vec![row("c1", "blazers", Some("black")), row("c1", "blazers", Some("black"))],
            vec![],
            vec![row("c2", "jackets", None)],
        ]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[2].comment_id, "c2");
    }

    #[test]
    fn csv_layout() {
        let dataset = Dataset::assemble(vec![vec![
            row("c1", "blazers", Some("black")),
            row("c2", "jackets", None),
        ]]);
        let mut out = vec![];
        dataset.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\
post_id,comment_id,comment_score,item,parent_item,adjective
p1,c1,12,blazers,jackets,black
p1,c2,12,jackets,jackets,
");
        assert_eq!(Dataset::from_reader(text.as_bytes()).unwrap(), dataset);
    }
}
