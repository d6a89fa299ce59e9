//! API integration tests
//!
//! These run against a live server. Start one locally, then:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5000";

/// Unique suffix so repeated runs do not trip the uniqueness checks
fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis()
}

fn member_payload(suffix: u128) -> Value {
    json!({
        "firstName": "Test",
        "lastName": "Member",
        "birthDate": "1990-04-02",
        "city": "Haifa",
        "email": format!("member{}@example.org", suffix),
        "phoneNumber": format!("052{:07}", suffix % 10_000_000),
        "username": format!("member{}", suffix),
        "password": "Abcdef1!"
    })
}

/// Register a fresh member and log in, returning the token
async fn register_and_login(client: &Client, suffix: u128) -> String {
    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&member_payload(suffix))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "username": format!("member{}", suffix),
            "password": "Abcdef1!"
        }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    assert_eq!(body["role"], "user");
    assert_eq!(body["message"], "Login successful");
    body["access_token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_hello_probe() {
    let client = Client::new();

    let response = client
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "hello!");
}

#[tokio::test]
#[ignore]
async fn test_register_rejects_weak_password() {
    let client = Client::new();
    let mut payload = member_payload(unique_suffix());
    payload["password"] = json!("abc");

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("Password"));
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "username": "no-such-user",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_login_and_dashboards() {
    let client = Client::new();
    let token = register_and_login(&client, unique_suffix()).await;

    // Plain users reach the user dashboard
    let response = client
        .get(format!("{}/user", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // And are turned away from the manager dashboard
    let response = client
        .get(format!("{}/manager", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // No token at all means 401
    let response = client
        .get(format!("{}/user", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_short_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "name": "ab",
            "author": "Some Author",
            "publishYear": "1999",
            "bookLoanType": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["error"],
        "Book Name should be between 3 to 100 characters."
    );
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();
    let suffix = unique_suffix();
    let name = format!("Integration Book {}", suffix);

    // Create
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "name": name,
            "author": "Test Author",
            "publishYear": "2001",
            "bookLoanType": 2
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book created successfully");

    // Find it back
    let response = client
        .get(format!("{}/findBook", BASE_URL))
        .query(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let books: Value = response.json().await.expect("Failed to parse response");
    let book = books
        .as_array()
        .and_then(|list| list.first())
        .expect("Created book not found");
    assert_eq!(book["isLoaned"], false);
    assert_eq!(book["publishYear"], "2001");
    let book_id = book["id"].as_i64().expect("No book id");

    // Delete
    let response = client
        .delete(format!("{}/books", BASE_URL))
        .json(&json!({ "id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book deleted successfully");

    // Gone from the active list
    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let books: Value = response.json().await.expect("Failed to parse response");
    assert!(books
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["id"].as_i64() != Some(book_id)));
}

#[tokio::test]
#[ignore]
async fn test_delete_unknown_book_is_404() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/books", BASE_URL))
        .json(&json!({ "id": 999_999 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_flow() {
    let client = Client::new();
    let suffix = unique_suffix();

    // A customer to borrow with
    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&member_payload(suffix))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/findCustomer", BASE_URL))
        .query(&[("username", format!("member{}", suffix))])
        .send()
        .await
        .expect("Failed to send request");
    let customers: Value = response.json().await.expect("Failed to parse response");
    let customer_id = customers[0]["id"].as_i64().expect("No customer id");

    // A book to borrow
    let name = format!("Borrowable {}", suffix);
    client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "name": name,
            "author": "Test Author",
            "publishYear": "2010",
            "bookLoanType": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .get(format!("{}/findBook", BASE_URL))
        .query(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    let books: Value = response.json().await.expect("Failed to parse response");
    let book_id = books[0]["id"].as_i64().expect("No book id");

    // Borrow: the UI sends custId as a string
    let response = client
        .put(format!("{}/books", BASE_URL))
        .json(&json!({ "id": book_id, "custId": customer_id.to_string() }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Borrowing again conflicts
    let response = client
        .put(format!("{}/books", BASE_URL))
        .json(&json!({ "id": book_id, "custId": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The loan shows up with the ten-day regular period
    let response = client
        .get(format!("{}/loans", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let loans: Value = response.json().await.expect("Failed to parse response");
    let loan = loans
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["bookId"].as_i64() == Some(book_id))
        .expect("Loan not listed");
    assert_eq!(loan["custId"].as_i64(), Some(customer_id));
    assert!(loan["expected_returnDate"].is_string());
    let loan_id = loan["id"].as_i64().expect("No loan id");

    // Return
    let response = client
        .delete(format!("{}/loans", BASE_URL))
        .json(&json!({ "id": loan_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Returning twice conflicts
    let response = client
        .delete(format!("{}/loans", BASE_URL))
        .json(&json!({ "id": loan_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The book is borrowable again
    let response = client
        .get(format!("{}/findBook", BASE_URL))
        .query(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    let books: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(books[0]["isLoaned"], false);
}

#[tokio::test]
#[ignore]
async fn test_customer_update_flow() {
    let client = Client::new();
    let suffix = unique_suffix();

    client
        .post(format!("{}/customers", BASE_URL))
        .json(&member_payload(suffix))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .get(format!("{}/findCustomer", BASE_URL))
        .query(&[("username", format!("member{}", suffix))])
        .send()
        .await
        .expect("Failed to send request");
    let customers: Value = response.json().await.expect("Failed to parse response");
    let customer_id = customers[0]["id"].as_i64().expect("No customer id");

    // Edit-form fetch carries the account fields
    let response = client
        .get(format!("{}/customerToUpdate", BASE_URL))
        .query(&[("id", customer_id)])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let form: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(form["firstName"], "Test");
    assert_eq!(form["birthDate"], "1990-04-02");
    assert_eq!(form["role"], "user");

    // Partial update: just the city
    let response = client
        .put(format!("{}/customers", BASE_URL))
        .json(&json!({ "id": customer_id, "city": "Jaffa" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Customer updated successfully");

    let response = client
        .get(format!("{}/customerToUpdate", BASE_URL))
        .query(&[("id", customer_id)])
        .send()
        .await
        .expect("Failed to send request");
    let form: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(form["city"], "Jaffa");
    assert_eq!(form["lastName"], "Member"); // untouched

    // Cleanup
    let response = client
        .delete(format!("{}/customers", BASE_URL))
        .json(&json!({ "id": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_username_rejected() {
    let client = Client::new();
    let suffix = unique_suffix();

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&member_payload(suffix))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Same username, different email/phone
    let mut duplicate = member_payload(suffix);
    duplicate["email"] = json!(format!("other{}@example.org", suffix));
    duplicate["phoneNumber"] = json!(format!("053{:07}", suffix % 10_000_000));

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&duplicate)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Username is already taken.");
}

#[tokio::test]
#[ignore]
async fn test_member_loan_list_requires_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/findCustomersBooks", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    let token = register_and_login(&client, unique_suffix()).await;

    let response = client
        .get(format!("{}/findCustomersBooks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.as_array().expect("Expected an array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_guest_watch_list_hides_ids() {
    let client = Client::new();

    let response = client
        .get(format!("{}/guestWatchList", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    for book in body.as_array().expect("Expected an array") {
        assert!(book.get("id").is_none());
        assert!(book.get("name").is_some());
        assert!(book.get("isLoaned").is_some());
    }
}
