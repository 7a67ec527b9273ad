use super::send_sms::REGION_FIELD;
use crate::domain::{BizId, CurrentPage, PageSize, QuerySendDetails, SendDate};

const PHONE_NUMBER_FIELD: &str = "PhoneNumber";

pub fn encode_query_send_details_query(
    region: &str,
    request: &QuerySendDetails,
) -> Vec<(String, String)> {
    let options = request.options();
    let mut params = vec![
        (REGION_FIELD.to_owned(), region.to_owned()),
        (
            PHONE_NUMBER_FIELD.to_owned(),
            request.recipient().raw().to_owned(),
        ),
    ];
    if let Some(biz_id) = options.biz_id.as_ref() {
        params.push((BizId::FIELD.to_owned(), biz_id.as_str().to_owned()));
    }
    params.push((SendDate::FIELD.to_owned(), request.send_date().to_wire()));
    params.push((
        PageSize::FIELD.to_owned(),
        options.page_size.value().to_string(),
    ));
    params.push((
        CurrentPage::FIELD.to_owned(),
        options.current_page.value().to_string(),
    ));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QueryOptions, RawPhoneNumber};

    #[test]
    fn encodes_defaults_without_biz_id() {
        let request = QuerySendDetails::new(
            RawPhoneNumber::new("12345678901").unwrap(),
            SendDate::parse("20210101").unwrap(),
            QueryOptions::default(),
        );
        assert_eq!(
            encode_query_send_details_query("cn-hangzhou", &request),
            vec![
                ("RegionId".to_owned(), "cn-hangzhou".to_owned()),
                ("PhoneNumber".to_owned(), "12345678901".to_owned()),
                ("SendDate".to_owned(), "20210101".to_owned()),
                ("PageSize".to_owned(), "10".to_owned()),
                ("CurrentPage".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn encodes_biz_id_and_paging() {
        let request = QuerySendDetails::new(
            RawPhoneNumber::new("12345678901").unwrap(),
            SendDate::parse("20210101").unwrap(),
            QueryOptions {
                page_size: PageSize::new(50).unwrap(),
                current_page: CurrentPage::new(3).unwrap(),
                biz_id: Some(BizId::new("abc123").unwrap()),
            },
        );
        let params = encode_query_send_details_query("cn-hangzhou", &request);
        assert!(params.contains(&("BizId".to_owned(), "abc123".to_owned())));
        assert!(params.contains(&("PageSize".to_owned(), "50".to_owned())));
        assert!(params.contains(&("CurrentPage".to_owned(), "3".to_owned())));
    }
}
