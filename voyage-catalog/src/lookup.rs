use crate::catalog::TripCatalog;
use crate::trip::Trip;

/// Resolves route identifiers against a catalog, remembering the last answer.
///
/// Rendering the same booking page repeatedly asks for the same id; the
/// cached position is reused until the id changes.
#[derive(Debug, Clone)]
pub struct TripLookup<'a> {
    catalog: &'a TripCatalog,
    last: Option<(String, Option<usize>)>,
}

impl<'a> TripLookup<'a> {
    pub fn new(catalog: &'a TripCatalog) -> Self {
        Self { catalog, last: None }
    }

    pub fn resolve(&mut self, id: &str) -> Option<&'a Trip> {
        let cached = match &self.last {
            Some((cached_id, position)) if cached_id == id => Some(*position),
            _ => None,
        };
        let position = match cached {
            Some(position) => position,
            None => {
                let position = self.catalog.position(id);
                self.last = Some((id.to_string(), position));
                position
            }
        };
        position.and_then(|idx| self.catalog.get(idx))
    }

    /// Identifier of the most recent resolution, if any.
    pub fn current_id(&self) -> Option<&str> {
        self.last.as_ref().map(|(id, _)| id.as_str())
    }
}
