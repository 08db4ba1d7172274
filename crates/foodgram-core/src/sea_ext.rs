use sea_orm::{EntityTrait, QuerySelect, Select};

use foodgram_domain::pagination::PageRequest;

/// Apply a clamped [`PageRequest`] as `OFFSET`/`LIMIT` to a select.
pub trait PaginateExt {
    fn page(self, page: PageRequest) -> Self;
}

impl<E> PaginateExt for Select<E>
where
    E: EntityTrait,
{
    fn page(self, page: PageRequest) -> Self {
        self.offset(page.offset()).limit(page.limit())
    }
}
