use crate::{
    api::{bearer, ApiClient},
    auth::Session,
    lookup::PersonLookup,
    models::Person,
    ClientResult,
};

/// GET /person/find?name=
pub async fn find_by_name(
    client: &ApiClient,
    session: &Session,
    name: &str,
) -> ClientResult<Vec<Person>> {
    tracing::debug!(name, "Searching people by name");

    let request = bearer(client.get("/person/find"), session).query(&[("name", name)]);
    let response = client.send("person_find", request).await?;

    let people: Vec<Person> = response.json().await?;
    tracing::debug!(name, count = people.len(), "Fetched people by name");
    Ok(people)
}

/// GET /person/findPerson?{pnr|email|username}=
///
/// The lookup carries exactly one query parameter; an unmatched term is a
/// 404 from the backend, surfaced as `NotFound`.
pub async fn find_person(
    client: &ApiClient,
    session: &Session,
    lookup: &PersonLookup,
) -> ClientResult<Person> {
    let (key, value) = lookup.query_param();
    tracing::debug!(key, value, "Looking up person");

    let request = bearer(client.get("/person/findPerson"), session).query(&[(key, value)]);
    let response = client.send("person_find_person", request).await?;

    let person: Person = response.json().await?;
    tracing::debug!(person_id = person.id, "Person resolved");
    Ok(person)
}

/// POST /person/updateRecruiter?pnr=&email=
///
/// Returns the backend's confirmation message.
pub async fn update_recruiter(
    client: &ApiClient,
    session: &Session,
    pnr: &str,
    email: &str,
) -> ClientResult<String> {
    tracing::info!(pnr, email, "Updating recruiter contact details");

    let request = bearer(client.post("/person/updateRecruiter"), session)
        .query(&[("pnr", pnr), ("email", email)]);
    let response = client.send("person_update_recruiter", request).await?;

    Ok(response.text().await?)
}
