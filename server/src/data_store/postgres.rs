use super::{
    models, schema, substring_like_pattern, ArtistId, CategoryId, FyyurStore, FyyurStoreFacade,
    QuestionFilter, QuestionId, ShowFilter, ShowId, StoreError, TriviaStore, TriviaStoreFacade,
    VenueId,
};
use diesel::expression::AsExpression;
use diesel::pg::PgConnection;
use diesel::prelude::*;

#[derive(Clone)]
pub struct PgDataStore {
    pool: diesel::r2d2::Pool<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let connection_manager = diesel::r2d2::ConnectionManager::<PgConnection>::new(database_url);
        Ok(Self {
            pool: diesel::r2d2::Pool::builder()
                .test_on_check_out(true)
                .min_idle(Some(2))
                .build(connection_manager)?,
        })
    }
}

impl FyyurStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

impl TriviaStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

pub struct PgDataStoreFacade {
    connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStoreFacade {
    pub fn with_pooled_connection(
        connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
    ) -> Self {
        Self { connection }
    }
}

impl FyyurStoreFacade for PgDataStoreFacade {
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError> {
        use schema::fyyur::venues::dsl::*;

        venues
            .select(models::Venue::as_select())
            .order_by((state, city, name))
            .load::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError> {
        use schema::fyyur::venues::dsl::*;

        venues
            .filter(id.eq(venue_id))
            .select(models::Venue::as_select())
            .first::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn search_venues(&mut self, search_term: &str) -> Result<Vec<models::Venue>, StoreError> {
        use schema::fyyur::venues::dsl::*;

        venues
            .filter(name.ilike(substring_like_pattern(search_term)))
            .select(models::Venue::as_select())
            .order_by(name)
            .load::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError> {
        use schema::fyyur::venues::dsl::*;

        Ok(diesel::insert_into(venues)
            .values(&venue)
            .returning(id)
            .get_result::<VenueId>(&mut self.connection)?)
    }

    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError> {
        use schema::fyyur::venues::dsl::*;

        let result = diesel::update(venues)
            .filter(id.eq(venue_id))
            .set(&venue)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        use schema::fyyur::venues::dsl::*;

        // The venue's shows are removed by the `ON DELETE CASCADE` foreign key constraint
        let count = diesel::delete(venues)
            .filter(id.eq(venue_id))
            .execute(&mut self.connection)?;
        if count == 0 {
            return Err(StoreError::NotExisting);
        }
        Ok(())
    }

    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError> {
        use schema::fyyur::artists::dsl::*;

        artists
            .select(models::Artist::as_select())
            .order_by(name)
            .load::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError> {
        use schema::fyyur::artists::dsl::*;

        artists
            .filter(id.eq(artist_id))
            .select(models::Artist::as_select())
            .first::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn search_artists(&mut self, search_term: &str) -> Result<Vec<models::Artist>, StoreError> {
        use schema::fyyur::artists::dsl::*;

        artists
            .filter(name.ilike(substring_like_pattern(search_term)))
            .select(models::Artist::as_select())
            .order_by(name)
            .load::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError> {
        use schema::fyyur::artists::dsl::*;

        Ok(diesel::insert_into(artists)
            .values(&artist)
            .returning(id)
            .get_result::<ArtistId>(&mut self.connection)?)
    }

    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError> {
        use schema::fyyur::artists::dsl::*;

        let result = diesel::update(artists)
            .filter(id.eq(artist_id))
            .set(&artist)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn get_shows(&mut self, filter: ShowFilter) -> Result<Vec<models::FullShow>, StoreError> {
        use schema::fyyur::{artists, shows, venues};

        let mut query = shows::table
            .inner_join(venues::table)
            .inner_join(artists::table)
            .select((
                models::Show::as_select(),
                venues::name,
                venues::image_link,
                artists::name,
                artists::image_link,
            ))
            .order_by((shows::start_time, shows::id))
            .into_boxed();
        if let Some(after) = filter.after {
            query = query.filter(shows::start_time.gt(after));
        }
        if let Some(before) = filter.before {
            query = query.filter(shows::start_time.lt(before));
        }
        if let Some(venue_id) = filter.venue_id {
            query = query.filter(shows::venue_id.eq(venue_id));
        }
        if let Some(artist_id) = filter.artist_id {
            query = query.filter(shows::artist_id.eq(artist_id));
        }

        Ok(query
            .load::<(models::Show, String, String, String, String)>(&mut self.connection)?
            .into_iter()
            .map(
                |(show, venue_name, venue_image_link, artist_name, artist_image_link)| {
                    models::FullShow {
                        show,
                        venue_name,
                        venue_image_link,
                        artist_name,
                        artist_image_link,
                    }
                },
            )
            .collect())
    }

    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError> {
        use schema::fyyur::shows::dsl::*;

        Ok(diesel::insert_into(shows)
            .values(&show)
            .returning(id)
            .get_result::<ShowId>(&mut self.connection)?)
    }
}

impl TriviaStoreFacade for PgDataStoreFacade {
    fn get_categories(&mut self) -> Result<Vec<models::Category>, StoreError> {
        use schema::trivia::categories::dsl::*;

        categories
            .select(models::Category::as_select())
            .order_by(id)
            .load::<models::Category>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_category(&mut self, category_id: CategoryId) -> Result<models::Category, StoreError> {
        use schema::trivia::categories::dsl::*;

        categories
            .filter(id.eq(category_id))
            .select(models::Category::as_select())
            .first::<models::Category>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_category(
        &mut self,
        category: models::NewCategory,
    ) -> Result<CategoryId, StoreError> {
        use schema::trivia::categories::dsl::*;

        Ok(diesel::insert_into(categories)
            .values(&category)
            .returning(id)
            .get_result::<CategoryId>(&mut self.connection)?)
    }

    fn get_questions(
        &mut self,
        filter: QuestionFilter,
    ) -> Result<Vec<models::Question>, StoreError> {
        use schema::trivia::questions::dsl::*;

        questions
            .filter(question_filter_to_sql(filter))
            .select(models::Question::as_select())
            .order_by(id)
            .load::<models::Question>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_question(
        &mut self,
        new_question: models::NewQuestion,
    ) -> Result<models::Question, StoreError> {
        use schema::trivia::questions::dsl::*;

        Ok(diesel::insert_into(questions)
            .values(&new_question)
            .returning(models::Question::as_returning())
            .get_result::<models::Question>(&mut self.connection)?)
    }

    fn delete_question(&mut self, question_id: QuestionId) -> Result<(), StoreError> {
        use schema::trivia::questions::dsl::*;

        let count = diesel::delete(questions)
            .filter(id.eq(question_id))
            .execute(&mut self.connection)?;
        if count == 0 {
            return Err(StoreError::NotExisting);
        }
        Ok(())
    }
}

type BoxedBoolExpression<'a, Table> =
    Box<dyn BoxableExpression<Table, diesel::pg::Pg, SqlType = diesel::sql_types::Bool> + 'a>;

fn question_filter_to_sql<'a>(
    filter: QuestionFilter,
) -> BoxedBoolExpression<'a, schema::trivia::questions::table> {
    use schema::trivia::questions::dsl::*;

    let mut expression: BoxedBoolExpression<'a, schema::trivia::questions::table> =
        Box::new(diesel::dsl::sql::<diesel::sql_types::Bool>("TRUE"));
    if let Some(category_id) = filter.category {
        expression = Box::new(expression.as_expression().and(category.eq(category_id)));
    }
    if let Some(search_term) = filter.search_term {
        expression = Box::new(
            expression
                .as_expression()
                .and(question.ilike(substring_like_pattern(&search_term))),
        );
    }
    if !filter.excluded_ids.is_empty() {
        expression = Box::new(
            expression
                .as_expression()
                .and(id.ne_all(filter.excluded_ids)),
        );
    }
    expression
}
