use serde_json::json;

use crate::support::{TestApp, routes};

fn cookies_form() -> serde_json::Value {
    json!({
        "title": "  Chocolate Chip Cookies ",
        "description": "Chewy with crisp edges",
        "ingredients": "2 cups flour\n  1 cup sugar  \n\n3 eggs",
        "instructions": "Preheat oven to 350F\nMix dry ingredients\n\nBake for 12 minutes",
        "prep_time": "15",
        "cook_time": "12",
        "servings": "24",
        "price": "12.5",
        "image_url": "",
    })
}

mod create_recipe {
    use super::*;

    #[tokio::test]
    async fn maps_form_text_onto_record() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::RECIPES, &cookies_form()).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Chocolate Chip Cookies");
        assert_eq!(
            res.body["ingredients"],
            json!(["2 cups flour", "1 cup sugar", "3 eggs"])
        );
        assert_eq!(res.body["instructions"].as_array().unwrap().len(), 3);
        assert_eq!(res.body["prep_time"], 15);
        assert_eq!(res.body["cook_time"], 12);
        assert_eq!(res.body["servings"], 24);
        assert_eq!(res.body["price"], 12.5);
        assert!(res.body["image_url"].is_null());
        assert!(res.body["id"].as_str().is_some());
        assert!(res.body["created_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn empty_numeric_fields_are_unset() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::RECIPES,
                &json!({
                    "title": "Toast",
                    "ingredients": "Bread",
                    "instructions": "Toast it",
                    "prep_time": "",
                    "price": "   ",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["prep_time"].is_null());
        assert!(res.body["cook_time"].is_null());
        assert!(res.body["servings"].is_null());
        assert!(res.body["price"].is_null());
        assert_eq!(res.body["description"], "");
    }

    #[tokio::test]
    async fn malformed_number_is_rejected() {
        let app = TestApp::spawn().await;
        let mut form = cookies_form();
        form["servings"] = json!("a dozen");

        let res = app.post(routes::RECIPES, &form).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["message"].as_str().unwrap().contains("servings"));
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;
        let mut form = cookies_form();
        form["title"] = json!("   ");

        let res = app.post(routes::RECIPES, &form).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn ingredients_of_only_blank_lines_are_rejected() {
        let app = TestApp::spawn().await;
        let mut form = cookies_form();
        form["ingredients"] = json!("\n  \n");

        let res = app.post(routes::RECIPES, &form).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(app.url(routes::RECIPES))
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
    }
}

mod list_recipes {
    use super::*;

    /// Seeds three recipes, created in the order Pesto, Carbonara, Salad.
    async fn seed(app: &TestApp) {
        app.create_recipe("Basil Pesto", "Basil\nPine nuts\nGarlic\nParmesan", "8")
            .await;
        app.create_recipe("Carbonara", "Spaghetti\nEggs\nGuanciale\nPecorino", "14")
            .await;
        app.create_recipe("Green Salad", "Lettuce\nOlive oil", "")
            .await;
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::RECIPES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 0);
        assert_eq!(res.body["matched"], 0);
        assert!(res.titles().is_empty());
    }

    #[tokio::test]
    async fn default_order_is_newest_first() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(routes::RECIPES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.titles(), ["Green Salad", "Carbonara", "Basil Pesto"]);
        assert_eq!(res.body["total"], 3);
        assert_eq!(res.body["matched"], 3);
    }

    #[tokio::test]
    async fn query_matches_title_description_and_ingredients_case_insensitively() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let by_title = app.get(&routes::recipes_query("PESTO", "")).await;
        assert_eq!(by_title.titles(), ["Basil Pesto"]);

        let by_ingredient = app.get(&routes::recipes_query("eggs", "")).await;
        assert_eq!(by_ingredient.titles(), ["Carbonara"]);

        let by_description = app.get(&routes::recipes_query("test catalog", "")).await;
        assert_eq!(by_description.body["matched"], 3);
    }

    #[tokio::test]
    async fn query_without_matches_returns_empty_list() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(&routes::recipes_query("zzz", "")).await;

        assert_eq!(res.status, 200);
        assert!(res.titles().is_empty());
        assert_eq!(res.body["total"], 3);
        assert_eq!(res.body["matched"], 0);
    }

    #[tokio::test]
    async fn whitespace_query_does_not_filter() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get("/api/v1/recipes?q=%20%20").await;

        assert_eq!(res.body["matched"], 3);
    }

    #[tokio::test]
    async fn sort_most_orders_by_ingredient_count_then_price() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(&routes::recipes_query("", "most")).await;

        assert_eq!(res.status, 200);
        // Pesto and Carbonara both have four ingredients; Carbonara costs more.
        assert_eq!(res.titles(), ["Carbonara", "Basil Pesto", "Green Salad"]);
    }

    #[tokio::test]
    async fn sort_recent_orders_by_creation_time() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get("/api/v1/recipes?sort=recent").await;

        assert_eq!(res.titles(), ["Green Salad", "Carbonara", "Basil Pesto"]);
    }

    #[tokio::test]
    async fn filter_and_sort_combine() {
        let app = TestApp::spawn().await;
        seed(&app).await;
        app.create_recipe("Olive Tapenade", "Olives\nCapers\nOlive oil", "6")
            .await;

        let res = app.get(&routes::recipes_query("oil", "most")).await;

        assert_eq!(res.titles(), ["Olive Tapenade", "Green Salad"]);
        assert_eq!(res.body["total"], 4);
    }

    #[tokio::test]
    async fn empty_sort_keeps_default_order() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get("/api/v1/recipes?q=&sort=").await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.titles(), ["Green Salad", "Carbonara", "Basil Pesto"]);
    }

    #[tokio::test]
    async fn sort_most_ties_negative_zero_price_with_missing_price() {
        let app = TestApp::spawn().await;
        app.create_recipe("Free Tea", "Tea", "").await;
        app.create_recipe("Odd Price Tea", "Tea", "-0").await;

        let res = app.get(&routes::recipes_query("", "most")).await;

        assert_eq!(res.titles(), ["Odd Price Tea", "Free Tea"]);
    }

    #[tokio::test]
    async fn unknown_sort_mode_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get("/api/v1/recipes?sort=oldest").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod get_recipe {
    use super::*;

    #[tokio::test]
    async fn returns_created_recipe() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Pancakes", "Flour\nMilk\nEggs", "3.25").await;

        let res = app.get(&routes::recipe(&id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id.as_str());
        assert_eq!(res.body["title"], "Pancakes");
        assert_eq!(res.body["price"], 3.25);
        assert_eq!(res.body["display_price"], "3.25");
        assert!(res.body["total_time"].is_null());
    }

    #[tokio::test]
    async fn detail_includes_total_time_and_formatted_price() {
        let app = TestApp::spawn().await;
        let id = app.post(routes::RECIPES, &cookies_form()).await.id();

        let res = app.get(&routes::recipe(&id)).await;

        assert_eq!(res.body["total_time"], 27);
        assert_eq!(res.body["display_price"], "12.50");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let missing = app
            .get(&routes::recipe("01936f0e-1234-7abc-8000-000000000001"))
            .await;
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body["code"], "NOT_FOUND");

        let malformed = app.get(&routes::recipe("not-an-id")).await;
        assert_eq!(malformed.status, 404);
    }

    #[tokio::test]
    async fn form_view_renders_lists_and_empty_numbers() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Lemonade", "Lemons\nSugar\nWater", "").await;

        let res = app.get(&routes::recipe_form(&id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Lemonade");
        assert_eq!(res.body["ingredients"], "Lemons\nSugar\nWater");
        assert_eq!(res.body["instructions"], "Mix\nServe");
        assert_eq!(res.body["price"], "");
        assert_eq!(res.body["prep_time"], "");
        assert_eq!(res.body["image_url"], "");
    }

    #[tokio::test]
    async fn form_view_round_trips_through_update() {
        let app = TestApp::spawn().await;
        let created = app.post(routes::RECIPES, &cookies_form()).await;
        let id = created.id();

        let form = app.get(&routes::recipe_form(&id)).await;
        let updated = app.put(&routes::recipe(&id), &form.body).await;

        assert_eq!(updated.status, 200, "{}", updated.text);
        for field in ["title", "ingredients", "instructions", "servings", "price"] {
            assert_eq!(updated.body[field], created.body[field], "{field} changed");
        }
    }
}

mod update_recipe {
    use super::*;

    #[tokio::test]
    async fn replaces_all_fields() {
        let app = TestApp::spawn().await;
        let created = app.post(routes::RECIPES, &cookies_form()).await;
        let id = created.id();

        let res = app
            .put(
                &routes::recipe(&id),
                &json!({
                    "title": "Oatmeal Cookies",
                    "ingredients": "Oats\nButter",
                    "instructions": "Bake",
                    "servings": "12",
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id.as_str());
        assert_eq!(res.body["title"], "Oatmeal Cookies");
        assert_eq!(res.body["ingredients"], json!(["Oats", "Butter"]));
        assert_eq!(res.body["servings"], 12);
        assert!(res.body["price"].is_null());
        assert!(res.body["prep_time"].is_null());
        assert_eq!(res.body["created_at"], created.body["created_at"]);

        let fetched = app.get(&routes::recipe(&id)).await;
        assert_eq!(fetched.body["title"], "Oatmeal Cookies");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::recipe("01936f0e-1234-7abc-8000-000000000001"),
                &cookies_form(),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn invalid_form_leaves_recipe_untouched() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Flatbread", "Flour\nWater", "2").await;

        let res = app
            .put(
                &routes::recipe(&id),
                &json!({
                    "title": "Flatbread",
                    "ingredients": "Flour\nWater",
                    "instructions": "Bake",
                    "price": "two",
                }),
            )
            .await;
        assert_eq!(res.status, 400);

        let fetched = app.get(&routes::recipe(&id)).await;
        assert_eq!(fetched.body["price"], 2.0);
    }
}

mod delete_recipe {
    use super::*;

    #[tokio::test]
    async fn removes_recipe_from_catalog() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Soup", "Stock\nVegetables", "").await;
        app.create_recipe("Bread", "Flour", "").await;

        let res = app.delete(&routes::recipe(&id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::recipe(&id)).await.status, 404);
        let list = app.get(routes::RECIPES).await;
        assert_eq!(list.titles(), ["Bread"]);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Soup", "Stock", "").await;

        assert_eq!(app.delete(&routes::recipe(&id)).await.status, 204);
        let again = app.delete(&routes::recipe(&id)).await;
        assert_eq!(again.status, 404);
        assert_eq!(again.body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::HEALTH).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "ok");
}
