//! Draft field state for the add form and the edit form.

use reelshelf_protocol::{Movie, MovieDraft, MovieId, ValidationError};

/// Editable field of a movie form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Genre,
    Year,
}

impl FormField {
    /// Field order used for focus cycling.
    pub const ALL: [FormField; 3] = [FormField::Title, FormField::Genre, FormField::Year];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Genre => "Genre",
            FormField::Year => "Year",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Genre,
            FormField::Genre => FormField::Year,
            FormField::Year => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Year,
            FormField::Genre => FormField::Title,
            FormField::Year => FormField::Genre,
        }
    }
}

/// Raw text of the add-record form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub genre: String,
    pub year: String,
}

impl AddForm {
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            year: year.into(),
        }
    }

    pub fn draft(&self) -> Result<MovieDraft, ValidationError> {
        MovieDraft::parse(&self.title, &self.year, &self.genre)
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Genre => &self.genre,
            FormField::Year => &self.year,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Genre => &mut self.genre,
            FormField::Year => &mut self.year,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Draft values for editing an existing record.
///
/// Dropping the form is the cancel path: nothing is sent and the cache is
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub genre: String,
    pub focus: FormField,
}

impl EditForm {
    /// Form pre-filled with the record's current values.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year.to_string(),
            genre: movie.genre.clone(),
            focus: FormField::Title,
        }
    }

    pub fn draft(&self) -> Result<MovieDraft, ValidationError> {
        MovieDraft::parse(&self.title, &self.year, &self.genre)
    }

    /// Full replacement record for this form's id.
    pub fn to_movie(&self) -> Result<Movie, ValidationError> {
        Ok(self.draft()?.into_movie(self.id.clone()))
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Genre => &self.genre,
            FormField::Year => &self.year,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Genre => &mut self.genre,
            FormField::Year => &mut self.year,
        }
    }

    /// Text of the focused field.
    pub fn focused_mut(&mut self) -> &mut String {
        self.field_mut(self.focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reelshelf_test_utils::movie;

    #[test]
    fn edit_form_prefills_current_values() {
        let form = EditForm::from_movie(&movie(5, "Heat", 1995, "Crime"));
        assert_eq!(form.title, "Heat");
        assert_eq!(form.year, "1995");
        assert_eq!(form.genre, "Crime");
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn edit_form_builds_replacement_with_same_id() {
        let mut form = EditForm::from_movie(&movie(5, "Heat", 1995, "Crime"));
        form.title = " Heat (Director's Cut) ".to_string();
        form.genre.clear();
        assert_eq!(
            form.to_movie().expect("valid"),
            movie(5, "Heat (Director's Cut)", 1995, "")
        );
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut field = FormField::Title;
        for expected in [FormField::Genre, FormField::Year, FormField::Title] {
            field = field.next();
            assert_eq!(field, expected);
        }
        assert_eq!(FormField::Title.prev(), FormField::Year);
    }

    #[test]
    fn add_form_clear_resets_fields() {
        let mut form = AddForm::new("Arrival", "Sci-Fi", "2016");
        form.field_mut(FormField::Genre).push_str(" Drama");
        assert_eq!(form.field(FormField::Genre), "Sci-Fi Drama");
        form.clear();
        assert_eq!(form, AddForm::default());
    }
}
