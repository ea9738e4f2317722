//! GetResponse stream definitions
//!
//! | stream                | path                                   | parent      |
//! |-----------------------|----------------------------------------|-------------|
//! | campaigns             | /campaigns                             |             |
//! | campaign_details      | /campaigns/{campaignId}                | campaigns   |
//! | contacts              | /contacts                              |             |
//! | contact_details       | /contacts/{contactId}                  | contacts    |
//! | contact_activities    | /contacts/{contactId}/activities       | contacts    |
//! | newsletters           | /newsletters                           |             |
//! | newsletter_details    | /newsletters/{newsletterId}            | newsletters |
//! | newsletter_activities | /newsletters/{newsletterId}/activities | newsletters |
//! | sms                   | /sms                                   |             |
//! | webinars              | /webinars                              |             |

mod campaigns;
mod contacts;
mod newsletters;
mod sms;
mod webinars;

use crate::error::Result;
use crate::schema::Field;
use crate::stream::StreamRegistry;

/// Field name activity payloads are wrapped under
pub const ACTIVITIES_FIELD: &str = "activities";

/// Build the registry of every supported stream
pub fn default_registry() -> Result<StreamRegistry> {
    let mut registry = StreamRegistry::new();
    campaigns::register(&mut registry)?;
    contacts::register(&mut registry)?;
    newsletters::register(&mut registry)?;
    sms::register(&mut registry)?;
    webinars::register(&mut registry)?;
    Ok(registry)
}

fn href() -> Field {
    Field::uri("href").describe("Direct hyperlink to a resource")
}

fn campaign_ref() -> Vec<Field> {
    vec![
        Field::string("campaignId").required().describe("Campaign ID"),
        href(),
        Field::string("name").describe("The campaign name"),
    ]
}
